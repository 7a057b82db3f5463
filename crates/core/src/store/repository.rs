//! Repository contract for the entity collections
//!
//! Mirrors the operations of the hosted document store the dashboard talks
//! to: add, get, list, update, delete, and a push subscription that delivers
//! the whole collection after every change.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::Result;

/// A record that lives in a collection and gets its id from the store.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Payload accepted when creating a document.
    type Draft: DeserializeOwned + Send + 'static;
    /// Partial update accepted by `update`.
    type Patch: DeserializeOwned + Send + 'static;

    /// Singular name used in logs and errors ("task", "category", ...).
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Build a document from a validated draft and a store-assigned id.
    fn from_draft(id: String, draft: Self::Draft) -> Result<Self>;

    /// Apply a partial update in place.
    fn apply(&mut self, patch: Self::Patch) -> Result<()>;
}

/// Repository interface for document CRUD operations
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Create a new document, returning it with its assigned id
    async fn create(&self, draft: T::Draft) -> Result<T>;

    /// Get a document by ID
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// Get all documents in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Update an existing document
    async fn update(&self, id: &str, patch: T::Patch) -> Result<T>;

    /// Delete a document by ID
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Receive the full collection after every successful mutation
    fn subscribe(&self) -> broadcast::Receiver<Vec<T>>;
}
