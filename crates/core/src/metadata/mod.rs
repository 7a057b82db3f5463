//! Categories and tags
//!
//! The classification labels a task references by id.

mod model;

pub use model::*;
