//! Table and card view helpers: sorting, pagination, display rows

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::dates;
use crate::lookup::Lookup;
use crate::task::{Task, TaskStatus};

/// Characters of description shown on a task card
pub const PREVIEW_CHARS: usize = 100;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Column a task table can be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Title,
    Status,
    DueDate,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::DueDate => return self.compare_instants(&a.due_date, &b.due_date),
            SortKey::CreatedAt => return self.compare_instants(&a.created_at, &b.created_at),
        };
        self.directed(ordering)
    }

    /// Chronological, whatever ISO shape each side uses. Unparseable values
    /// go last in either direction.
    fn compare_instants(&self, a: &str, b: &str) -> Ordering {
        match (dates::parse_instant(a), dates::parse_instant(b)) {
            (Some(x), Some(y)) => self.directed(x.cmp(&y).then_with(|| a.cmp(b))),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.directed(a.cmp(b)),
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Stable sort; ties keep their incoming order in both directions
pub fn sort_tasks(tasks: &mut [&Task], sort: SortSpec) {
    tasks.sort_by(|a, b| sort.compare(a, b));
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Clamp page to at least 1 and page size to 1..=MAX_PAGE_SIZE
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Cut one page out of `items`. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let request = PageRequest::new(request.page, request.per_page);
    let total = items.len();
    let total_pages = total.div_ceil(request.per_page);
    let start = (request.page - 1).saturating_mul(request.per_page);

    let items = items
        .into_iter()
        .skip(start)
        .take(request.per_page)
        .collect();

    Page {
        items,
        page: request.page,
        per_page: request.per_page,
        total,
        total_pages,
    }
}

/// A task with its references resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description_preview: String,
    pub status: TaskStatus,
    pub category_id: String,
    pub category: String,
    pub tag_ids: Vec<String>,
    /// Dangling tags show as "Unknown" here
    pub tags: Vec<String>,
    pub due_date: String,
    pub created_at: String,
}

impl TaskRow {
    pub fn new(task: &Task, lookup: &Lookup<'_>) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description_preview: description_preview(task.description.as_deref()),
            status: task.status,
            category_id: task.category_id.clone(),
            category: lookup.category_name(&task.category_id).to_string(),
            tag_ids: task.tag_ids.clone(),
            tags: lookup
                .tag_labels(&task.tag_ids)
                .into_iter()
                .map(str::to_string)
                .collect(),
            due_date: task.due_date.clone(),
            created_at: task.created_at.clone(),
        }
    }
}

/// Shortened description for task cards
pub fn description_preview(description: Option<&str>) -> String {
    match description {
        None | Some("") => "No description".to_string(),
        Some(text) if text.chars().count() > PREVIEW_CHARS => {
            let head: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", head)
        }
        Some(text) => text.to_string(),
    }
}
