//! Core library for the Taskdash dashboard
//!
//! This crate contains the logic every dashboard view depends on:
//! - Task, category and tag models
//! - Filtering (status, category, tags, free-text search)
//! - Table sorting and pagination
//! - Analytics and spreadsheet export
//! - A file-backed store implementing the collection contract

pub mod analytics;
pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod lookup;
pub mod metadata;
pub mod store;
pub mod task;
pub mod view;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
