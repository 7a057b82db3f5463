//! Entity storage
//!
//! A local implementation of the document store contract: JSON-file
//! collections with server-assigned ids and push subscriptions.

mod entity_store;
mod file_store;
mod repository;

pub use entity_store::{CollectionOf, EntityStore, Snapshot};
pub use file_store::FileCollection;
pub use repository::{Document, Repository};
