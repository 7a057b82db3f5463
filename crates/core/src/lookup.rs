//! Id to name resolution for categories and tags
//!
//! References are not checked by the store, so every miss degrades to a
//! placeholder or is skipped instead of failing.

use std::collections::HashMap;

use crate::metadata::{Category, Tag};

/// Label shown for a reference that no longer resolves
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Borrowed lookup tables over the category and tag collections
#[derive(Debug, Clone, Default)]
pub struct Lookup<'a> {
    categories: HashMap<&'a str, &'a Category>,
    tags: HashMap<&'a str, &'a Tag>,
}

impl<'a> Lookup<'a> {
    /// Index both collections. On duplicate ids the last entry wins.
    pub fn new(categories: &'a [Category], tags: &'a [Tag]) -> Self {
        Self {
            categories: categories.iter().map(|c| (c.id.as_str(), c)).collect(),
            tags: tags.iter().map(|t| (t.id.as_str(), t)).collect(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&'a Category> {
        self.categories.get(id).copied()
    }

    pub fn tag(&self, id: &str) -> Option<&'a Tag> {
        self.tags.get(id).copied()
    }

    /// Category name, or "Unknown" for a dangling id
    pub fn category_name(&self, id: &str) -> &'a str {
        self.category(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Names of the tags that resolve; dangling ids are dropped
    pub fn tag_names<'i, I>(&self, ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'i String>,
    {
        ids.into_iter()
            .filter_map(|id| self.tag(id))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// One label per id, "Unknown" for dangling ones
    pub fn tag_labels<'i, I>(&self, ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'i String>,
    {
        ids.into_iter()
            .map(|id| self.tag(id).map(|t| t.name.as_str()).unwrap_or(UNKNOWN_LABEL))
            .collect()
    }
}
