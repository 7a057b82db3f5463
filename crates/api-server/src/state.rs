//! Application state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use taskdash_core::store::EntityStore;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<EntityStore>,
    exporting: AtomicBool,
}

impl AppState {
    /// Open the store under the configured data directory
    pub async fn new(config: ServerConfig) -> taskdash_core::Result<Self> {
        let store = EntityStore::open(&config.data_dir).await?;
        if config.seed_default_category {
            store.ensure_default_category().await?;
        }
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: ServerConfig, store: Arc<EntityStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                exporting: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.inner.store
    }

    pub fn store_arc(&self) -> Arc<EntityStore> {
        Arc::clone(&self.inner.store)
    }

    /// Claim the export slot. `None` while another export is running.
    pub fn begin_export(&self) -> Option<ExportPermit> {
        self.inner
            .exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportPermit {
                state: self.clone(),
            })
    }
}

/// Held for the duration of one export; frees the slot on drop
pub struct ExportPermit {
    state: AppState,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.state.inner.exporting.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_seeds_default_category() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp.path().to_path_buf(),
            ..Default::default()
        };

        let state = AppState::new(config).await.unwrap();
        let snapshot = state.store().snapshot().await.unwrap();
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.categories[0].name, "General");
    }

    #[tokio::test]
    async fn test_export_slot_is_exclusive() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp.path().to_path_buf(),
            seed_default_category: false,
            ..Default::default()
        };
        let state = AppState::new(config).await.unwrap();

        let permit = state.begin_export().unwrap();
        assert!(state.begin_export().is_none());

        drop(permit);
        assert!(state.begin_export().is_some());
    }
}
