//! Task model definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates;
use crate::store::Document;
use crate::{Error, Result};

/// Task status, as stored in the document store
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Raw value, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Human readable label used in charts and the summary sheet
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub category_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Calendar date, ISO 8601
    pub due_date: String,
    /// Set once at creation, ISO 8601
    pub created_at: String,
}

impl Task {
    /// Create a task with the given id and title.
    ///
    /// Category and due date start empty; `created_at` is stamped now.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            category_id: String::new(),
            tag_ids: Vec::new(),
            due_date: String::new(),
            created_at: dates::timestamp(chrono::Utc::now()),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = category_id.into();
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_ids = dedup_tags(tag_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }

    /// Description, or the empty string when absent
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Payload for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub category_id: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    pub due_date: String,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_category(&self.category_id)?;
        validate_due_date(&self.due_date)
    }
}

/// Partial update for a task. `createdAt` is deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Document for Task {
    type Draft = NewTask;
    type Patch = TaskPatch;

    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewTask) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description.filter(|d| !d.is_empty()),
            status: draft.status,
            category_id: draft.category_id,
            tag_ids: dedup_tags(draft.tag_ids),
            due_date: draft.due_date,
            created_at: dates::timestamp(chrono::Utc::now()),
        })
    }

    fn apply(&mut self, patch: TaskPatch) -> Result<()> {
        // Validate everything before touching the record.
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(category_id) = &patch.category_id {
            validate_category(category_id)?;
        }
        if let Some(due_date) = &patch.due_date {
            validate_due_date(due_date)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(tag_ids) = patch.tag_ids {
            self.tag_ids = dedup_tags(tag_ids);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_category(category_id: &str) -> Result<()> {
    if category_id.trim().is_empty() {
        return Err(Error::InvalidInput("A category is required".to_string()));
    }
    Ok(())
}

fn validate_due_date(due_date: &str) -> Result<()> {
    if dates::parse_instant(due_date).is_none() {
        return Err(Error::InvalidInput(format!(
            "Invalid due date: {:?}",
            due_date
        )));
    }
    Ok(())
}

fn dedup_tags(tag_ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tag_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewTask {
        NewTask {
            title: "Write report".to_string(),
            description: Some(String::new()),
            status: TaskStatus::Todo,
            category_id: "c1".to_string(),
            tag_ids: vec!["t1".to_string(), "t2".to_string(), "t1".to_string()],
            due_date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, TaskStatus::Done);
        assert_eq!(TaskStatus::InProgress.label(), "In Progress");
    }

    #[test]
    fn test_task_json_uses_camel_case() {
        let task = Task::new("abc", "Buy milk")
            .with_category("c1")
            .with_tags(["t1"])
            .with_due_date("2024-01-01")
            .with_created_at("2024-01-01T00:00:00.000Z");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["categoryId"], "c1");
        assert_eq!(value["tagIds"][0], "t1");
        assert_eq!(value["dueDate"], "2024-01-01");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_from_draft_normalizes() {
        let task = Task::from_draft("id-1".to_string(), draft()).unwrap();
        assert_eq!(task.id, "id-1");
        assert!(task.description.is_none());
        assert_eq!(task.tag_ids, vec!["t1", "t2"]);
        assert!(dates::parse_instant(&task.created_at).is_some());
    }

    #[test]
    fn test_draft_validation() {
        let mut blank = draft();
        blank.title = "   ".to_string();
        assert!(matches!(
            Task::from_draft("x".to_string(), blank),
            Err(Error::InvalidInput(_))
        ));

        let mut no_category = draft();
        no_category.category_id = String::new();
        assert!(no_category.validate().is_err());

        let mut bad_date = draft();
        bad_date.due_date = "someday".to_string();
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn test_apply_patch_keeps_created_at() {
        let mut task = Task::from_draft("id-1".to_string(), draft()).unwrap();
        let created_at = task.created_at.clone();

        task.apply(TaskPatch {
            title: Some("Ship report".to_string()),
            status: Some(TaskStatus::Done),
            tag_ids: Some(vec!["t3".to_string()]),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(task.title, "Ship report");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.tag_ids, vec!["t3"]);
        assert_eq!(task.created_at, created_at);
    }

    #[test]
    fn test_rejected_patch_leaves_task_untouched() {
        let mut task = Task::from_draft("id-1".to_string(), draft()).unwrap();
        let before = task.clone();

        let result = task.apply(TaskPatch {
            status: Some(TaskStatus::Done),
            title: Some(String::new()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(task, before);
    }
}
