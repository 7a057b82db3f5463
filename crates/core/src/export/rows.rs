//! Detail projection: one flat row per task

use serde::Serialize;

use crate::lookup::Lookup;
use crate::task::Task;

/// Column headers of the detail sheet, in order
pub const DETAIL_HEADERS: [&str; 7] = [
    "Title",
    "Description",
    "Status",
    "Category",
    "Tags",
    "Due Date",
    "Created At",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub title: String,
    pub description: String,
    /// Raw status value, e.g. `in-progress`
    pub status: &'static str,
    pub category: String,
    pub tags: String,
    pub due_date: String,
    pub created_at: String,
}

impl DetailRow {
    pub fn new(task: &Task, lookup: &Lookup<'_>) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description_or_empty().to_string(),
            status: task.status.as_str(),
            category: lookup.category_name(&task.category_id).to_string(),
            tags: lookup.tag_names(&task.tag_ids).join(", "),
            due_date: task.due_date.clone(),
            created_at: task.created_at.clone(),
        }
    }

    /// Cell values in `DETAIL_HEADERS` order
    pub fn cells(&self) -> [&str; 7] {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.status,
            self.category.as_str(),
            self.tags.as_str(),
            self.due_date.as_str(),
            self.created_at.as_str(),
        ]
    }
}

/// Project tasks into detail rows, keeping their order
pub fn to_detail_rows<'t, I>(tasks: I, lookup: &Lookup<'_>) -> Vec<DetailRow>
where
    I: IntoIterator<Item = &'t Task>,
{
    tasks
        .into_iter()
        .map(|task| DetailRow::new(task, lookup))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Category, Tag};
    use crate::task::TaskStatus;

    #[test]
    fn test_detail_row_resolves_names() {
        let categories = vec![Category::new("c1", "Work")];
        let tags = vec![Tag::new("t1", "Urgent")];
        let lookup = Lookup::new(&categories, &tags);

        let tasks = vec![Task::new("1", "A")
            .with_category("c1")
            .with_tags(["t1"])
            .with_due_date("2020-01-01")
            .with_created_at("2020-01-01")];

        let rows = to_detail_rows(&tasks, &lookup);
        assert_eq!(
            rows,
            vec![DetailRow {
                title: "A".to_string(),
                description: String::new(),
                status: "todo",
                category: "Work".to_string(),
                tags: "Urgent".to_string(),
                due_date: "2020-01-01".to_string(),
                created_at: "2020-01-01".to_string(),
            }]
        );
    }

    #[test]
    fn test_dangling_references() {
        let categories = vec![Category::new("c1", "Work")];
        let tags = vec![Tag::new("t1", "Urgent"), Tag::new("t2", "Later")];
        let lookup = Lookup::new(&categories, &tags);

        let task = Task::new("1", "B")
            .with_category("c2")
            .with_status(TaskStatus::InProgress)
            .with_tags(["t2", "gone", "t1"])
            .with_description("notes");

        let row = DetailRow::new(&task, &lookup);
        assert_eq!(row.category, "Unknown");
        assert_eq!(row.tags, "Later, Urgent");
        assert_eq!(row.status, "in-progress");
        assert_eq!(row.description, "notes");
        assert_eq!(row.cells()[4], "Later, Urgent");
    }
}
