//! Task module
//!
//! This module contains the task record and its create/update payloads.

mod model;

pub use model::*;
