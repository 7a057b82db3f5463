//! The three collections behind the dashboard

use std::path::Path;
use tracing::info;

use super::file_store::FileCollection;
use super::repository::{Document, Repository};
use crate::metadata::{Category, NewLabel, Tag, DEFAULT_CATEGORY_NAME, DEFAULT_COLOR};
use crate::task::Task;
use crate::Result;

/// Owned copy of every collection, taken at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Tasks, categories and tags stored side by side in one data directory
pub struct EntityStore {
    tasks: FileCollection<Task>,
    categories: FileCollection<Category>,
    tags: FileCollection<Tag>,
}

impl EntityStore {
    /// Open (or lazily create) the collections under `data_dir`
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        Ok(Self {
            tasks: FileCollection::new(data_dir.join("tasks.json")).await?,
            categories: FileCollection::new(data_dir.join("categories.json")).await?,
            tags: FileCollection::new(data_dir.join("tags.json")).await?,
        })
    }

    pub fn tasks(&self) -> &FileCollection<Task> {
        &self.tasks
    }

    pub fn categories(&self) -> &FileCollection<Category> {
        &self.categories
    }

    pub fn tags(&self) -> &FileCollection<Tag> {
        &self.tags
    }

    /// Seed a "General" category when there are none.
    ///
    /// Returns the created category, if any.
    pub async fn ensure_default_category(&self) -> Result<Option<Category>> {
        if !self.categories.list().await?.is_empty() {
            return Ok(None);
        }

        let general = self
            .categories
            .create(NewLabel::new(DEFAULT_CATEGORY_NAME).with_color(DEFAULT_COLOR))
            .await?;
        info!("Seeded default category {}", general.id);
        Ok(Some(general))
    }

    /// Copy all three collections
    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            tasks: self.tasks.list().await?,
            categories: self.categories.list().await?,
            tags: self.tags.list().await?,
        })
    }
}

/// Typed access to one of the collections, used by generic handlers.
pub trait CollectionOf<T: Document> {
    fn collection(&self) -> &FileCollection<T>;
}

impl CollectionOf<Task> for EntityStore {
    fn collection(&self) -> &FileCollection<Task> {
        &self.tasks
    }
}

impl CollectionOf<Category> for EntityStore {
    fn collection(&self) -> &FileCollection<Category> {
        &self.categories
    }
}

impl CollectionOf<Tag> for EntityStore {
    fn collection(&self) -> &FileCollection<Tag> {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_default_category_seeded_once() {
        let dir = tempdir().unwrap();
        let store = EntityStore::open(dir.path()).await.unwrap();

        let seeded = store.ensure_default_category().await.unwrap().unwrap();
        assert_eq!(seeded.name, "General");
        assert_eq!(seeded.color, "#999999");

        assert!(store.ensure_default_category().await.unwrap().is_none());
        assert_eq!(store.categories().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_category_keeps_tasks() {
        let dir = tempdir().unwrap();
        let store = EntityStore::open(dir.path()).await.unwrap();

        let work = store.categories().create(NewLabel::new("Work")).await.unwrap();
        store
            .tasks()
            .create(NewTask {
                title: "Orphan soon".to_string(),
                category_id: work.id.clone(),
                due_date: "2024-01-01".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(store.categories().delete(&work.id).await.unwrap());

        let snapshot = store.snapshot().await.unwrap();
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].category_id, work.id);
    }

    #[tokio::test]
    async fn test_collection_of_resolves_each_type() {
        let dir = tempdir().unwrap();
        let store = EntityStore::open(dir.path()).await.unwrap();

        CollectionOf::<Tag>::collection(&store)
            .create(NewLabel::new("Urgent"))
            .await
            .unwrap();

        assert_eq!(store.tags().list().await.unwrap().len(), 1);
        assert!(CollectionOf::<Category>::collection(&store)
            .list()
            .await
            .unwrap()
            .is_empty());
    }
}
