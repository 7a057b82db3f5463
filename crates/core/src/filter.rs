//! Task filtering
//!
//! A [`FilterSpec`] is the set of constraints the user picked on the
//! dashboard. Every clause that is absent or empty matches everything; the
//! clauses that are present are combined with AND.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

/// Constraints narrowing a task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Every listed tag must be on the task
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Case-insensitive substring of title or description
    #[serde(default)]
    pub search_query: String,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_tag(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_ids.push(tag_id.into());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// True when no clause constrains anything
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.category().is_none()
            && self.tag_ids.is_empty()
            && self.search_query.trim().is_empty()
    }

    /// Does `task` pass every clause?
    pub fn matches(&self, task: &Task) -> bool {
        Matcher::new(self).matches(task)
    }

    /// Tasks that match, in their original order
    pub fn apply<'t, I>(&self, tasks: I) -> Vec<&'t Task>
    where
        I: IntoIterator<Item = &'t Task>,
    {
        let matcher = Matcher::new(self);
        tasks.into_iter().filter(|t| matcher.matches(t)).collect()
    }

    // An empty category id is treated the same as no category.
    fn category(&self) -> Option<&str> {
        self.category_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Evaluate one task against one spec
pub fn matches(task: &Task, spec: &FilterSpec) -> bool {
    spec.matches(task)
}

/// Stable, order-preserving filter over a collection
pub fn filter_tasks<'t>(tasks: &'t [Task], spec: &FilterSpec) -> Vec<&'t Task> {
    spec.apply(tasks)
}

/// A spec with the search needle lower-cased once
struct Matcher<'s> {
    spec: &'s FilterSpec,
    needle: Option<String>,
}

impl<'s> Matcher<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        let query = spec.search_query.trim();
        Self {
            spec,
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        self.status_matches(task)
            && self.category_matches(task)
            && self.tags_match(task)
            && self.search_matches(task)
    }

    fn status_matches(&self, task: &Task) -> bool {
        self.spec.status.map_or(true, |status| task.status == status)
    }

    fn category_matches(&self, task: &Task) -> bool {
        self.spec
            .category()
            .map_or(true, |id| task.category_id == id)
    }

    fn tags_match(&self, task: &Task) -> bool {
        self.spec.tag_ids.iter().all(|id| task.has_tag(id))
    }

    fn search_matches(&self, task: &Task) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        task.title.to_lowercase().contains(needle.as_str())
            || task
                .description_or_empty()
                .to_lowercase()
                .contains(needle.as_str())
    }
}
