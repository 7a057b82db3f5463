//! Summary projection: totals, status breakdown, overdue count, category
//! distribution.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::dates;
use crate::metadata::Category;
use crate::task::{Task, TaskStatus};

/// `count / total` as a percentage rounded to one decimal; 0 for an empty total
pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Display form of [`percent_of`]: `"42.9%"`, or `"0%"` for an empty total
pub fn format_percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", percent_of(count, total))
}

/// Not done and due strictly before `now`. Unparseable due dates never are.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.status != TaskStatus::Done
        && dates::parse_instant(&task.due_date).is_some_and(|due| due < now)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TaskStatus,
    pub label: &'static str,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub count: usize,
    pub percent: f64,
}

/// Aggregate counts over one snapshot of tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    /// Always all three statuses, in `TaskStatus::ALL` order
    pub statuses: Vec<StatusCount>,
    pub overdue: usize,
    /// One entry per input category, in input order
    pub categories: Vec<CategoryCount>,
}

impl Summary {
    /// Single pass over `tasks`; `now` is read once by the caller.
    pub fn compute<'t, I>(tasks: I, categories: &[Category], now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'t Task>,
    {
        let mut total = 0;
        let mut overdue = 0;
        let mut by_status: HashMap<TaskStatus, usize> = HashMap::new();
        let mut by_category: HashMap<&str, usize> = HashMap::new();

        for task in tasks {
            total += 1;
            *by_status.entry(task.status).or_default() += 1;
            *by_category.entry(task.category_id.as_str()).or_default() += 1;
            if is_overdue(task, now) {
                overdue += 1;
            }
        }

        let statuses = TaskStatus::ALL
            .iter()
            .map(|&status| {
                let count = by_status.get(&status).copied().unwrap_or(0);
                StatusCount {
                    status,
                    label: status.label(),
                    count,
                    percent: percent_of(count, total),
                }
            })
            .collect();

        let categories = categories
            .iter()
            .map(|cat| {
                let count = by_category.get(cat.id.as_str()).copied().unwrap_or(0);
                CategoryCount {
                    category_id: cat.id.clone(),
                    name: cat.name.clone(),
                    color: cat.color.clone(),
                    count,
                    percent: percent_of(count, total),
                }
            })
            .collect();

        Self {
            total,
            statuses,
            overdue,
            categories,
        }
    }

    pub fn status(&self, status: TaskStatus) -> Option<&StatusCount> {
        self.statuses.iter().find(|s| s.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn task(id: &str, status: TaskStatus, category: &str, due: &str) -> Task {
        Task::new(id, format!("Task {}", id))
            .with_status(status)
            .with_category(category)
            .with_due_date(due)
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent_of(1, 3), 33.3);
        assert_eq!(percent_of(2, 3), 66.7);
        assert_eq!(percent_of(0, 0), 0.0);
        assert_eq!(format_percent(1, 8), "12.5%");
        assert_eq!(format_percent(3, 3), "100.0%");
        assert_eq!(format_percent(0, 0), "0%");
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        let categories = vec![Category::new("c1", "Work")];
        let tasks: Vec<Task> = Vec::new();
        let summary = Summary::compute(&tasks, &categories, now());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.overdue, 0);
        assert!(summary
            .statuses
            .iter()
            .all(|s| s.count == 0 && s.percent == 0.0));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].count, 0);
        assert_eq!(summary.categories[0].percent, 0.0);
    }

    #[test]
    fn test_status_percentages_sum_to_about_100() {
        let tasks = vec![
            task("1", TaskStatus::Todo, "c1", "2030-01-01"),
            task("2", TaskStatus::InProgress, "c1", "2030-01-01"),
            task("3", TaskStatus::Done, "c1", "2030-01-01"),
        ];
        let summary = Summary::compute(&tasks, &[], now());

        let sum: f64 = summary.statuses.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() <= 0.15, "sum was {}", sum);
        assert_eq!(summary.status(TaskStatus::InProgress).unwrap().count, 1);
    }

    #[test]
    fn test_overdue_excludes_done() {
        let tasks = vec![
            task("1", TaskStatus::Todo, "c1", "2020-01-01"),
            task("2", TaskStatus::Done, "c1", "2020-01-01"),
            task("3", TaskStatus::InProgress, "c1", "2099-01-01"),
        ];
        let summary = Summary::compute(&tasks, &[], now());
        assert_eq!(summary.overdue, 1);
    }

    #[test]
    fn test_overdue_is_strictly_before_now() {
        let at_now = task("1", TaskStatus::Todo, "c1", "2024-06-01T12:00:00Z");
        assert!(!is_overdue(&at_now, now()));

        let just_before = task("2", TaskStatus::Todo, "c1", "2024-06-01T11:59:59Z");
        assert!(is_overdue(&just_before, now()));

        let garbage = task("3", TaskStatus::Todo, "c1", "soon");
        assert!(!is_overdue(&garbage, now()));
    }

    #[test]
    fn test_categories_follow_input_order() {
        let categories = vec![
            Category::new("c2", "Home"),
            Category::new("c1", "Work"),
            Category::new("c3", "Empty"),
        ];
        let tasks = vec![
            task("1", TaskStatus::Todo, "c1", "2030-01-01"),
            task("2", TaskStatus::Todo, "c1", "2030-01-01"),
            task("3", TaskStatus::Todo, "c2", "2030-01-01"),
            task("4", TaskStatus::Todo, "dangling", "2030-01-01"),
        ];
        let summary = Summary::compute(&tasks, &categories, now());

        let rows: Vec<(&str, usize, f64)> = summary
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.count, c.percent))
            .collect();
        assert_eq!(
            rows,
            vec![("Home", 1, 25.0), ("Work", 2, 50.0), ("Empty", 0, 0.0)]
        );
        assert_eq!(summary.total, 4);
    }
}
