//! File-based collection storage
//!
//! Stores one collection as a JSON array in a file on disk.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::repository::{Document, Repository};
use crate::{Error, Result};

/// Buffered snapshots per subscriber before it starts lagging
const CHANNEL_CAPACITY: usize = 32;

/// File-based collection using JSON
pub struct FileCollection<T: Document> {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache, kept in insertion order
    cache: RwLock<Vec<T>>,
    changes: broadcast::Sender<Vec<T>>,
}

impl<T: Document> FileCollection<T> {
    /// Open a collection backed by `path`
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Ok(Self {
            path,
            cache: RwLock::new(cache),
            changes,
        })
    }

    /// Write `docs` to disk and notify subscribers
    ///
    /// Callers hold the cache write guard across this call, so writes and
    /// broadcasts happen in mutation order.
    async fn persist(&self, docs: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(docs)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;

        // No receivers is fine.
        let _ = self.changes.send(docs.to_vec());
        Ok(())
    }

    fn not_found(id: &str) -> Error {
        Error::NotFound(format!("{} {}", T::KIND, id))
    }
}

#[async_trait]
impl<T: Document> Repository<T> for FileCollection<T> {
    async fn create(&self, draft: T::Draft) -> Result<T> {
        let doc = T::from_draft(Uuid::new_v4().to_string(), draft)?;

        let mut cache = self.cache.write().await;
        cache.push(doc.clone());
        if let Err(e) = self.persist(&cache).await {
            cache.pop();
            return Err(e);
        }

        debug!("Created {} {}", T::KIND, doc.id());
        Ok(doc)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let cache = self.cache.read().await;
        Ok(cache.iter().find(|d| d.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.cache.read().await.clone())
    }

    async fn update(&self, id: &str, patch: T::Patch) -> Result<T> {
        let mut cache = self.cache.write().await;
        let index = cache
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let previous = cache[index].clone();
        cache[index].apply(patch)?;
        if let Err(e) = self.persist(&cache).await {
            cache[index] = previous;
            return Err(e);
        }

        debug!("Updated {} {}", T::KIND, id);
        Ok(cache[index].clone())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut cache = self.cache.write().await;
        let Some(index) = cache.iter().position(|d| d.id() == id) else {
            return Ok(false);
        };

        let removed = cache.remove(index);
        if let Err(e) = self.persist(&cache).await {
            cache.insert(index, removed);
            return Err(e);
        }

        debug!("Deleted {} {}", T::KIND, id);
        Ok(true)
    }

    fn subscribe(&self) -> broadcast::Receiver<Vec<T>> {
        self.changes.subscribe()
    }
}
