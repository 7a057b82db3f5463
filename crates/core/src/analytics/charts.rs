//! Series behind the analytics dashboard charts

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::summary::{is_overdue, percent_of, CategoryCount};
use crate::dates;
use crate::metadata::Category;
use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSlice {
    pub status: TaskStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Pie slices for the statuses that occur, in status order
pub fn status_distribution(tasks: &[&Task]) -> Vec<StatusSlice> {
    TaskStatus::ALL
        .iter()
        .map(|&status| StatusSlice {
            status,
            label: status.label(),
            count: tasks.iter().filter(|t| t.status == status).count(),
        })
        .filter(|slice| slice.count > 0)
        .collect()
}

fn count_by_category<'t>(
    tasks: impl Iterator<Item = &'t Task>,
    categories: &[Category],
    total: usize,
) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        *counts.entry(task.category_id.as_str()).or_default() += 1;
    }

    let mut result: Vec<CategoryCount> = categories
        .iter()
        .map(|cat| {
            let count = counts.get(cat.id.as_str()).copied().unwrap_or(0);
            CategoryCount {
                category_id: cat.id.clone(),
                name: cat.name.clone(),
                color: cat.color.clone(),
                count,
                percent: percent_of(count, total),
            }
        })
        .collect();

    // Stable: equal counts keep category order.
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

/// Bars per category, busiest first; empty categories included
pub fn category_distribution(tasks: &[&Task], categories: &[Category]) -> Vec<CategoryCount> {
    count_by_category(tasks.iter().copied(), categories, tasks.len())
}

/// Overdue bars per category, busiest first; categories with none dropped
pub fn overdue_by_category(
    tasks: &[&Task],
    categories: &[Category],
    now: DateTime<Utc>,
) -> Vec<CategoryCount> {
    let overdue: Vec<&Task> = tasks
        .iter()
        .copied()
        .filter(|t| is_overdue(t, now))
        .collect();

    count_by_category(overdue.iter().copied(), categories, overdue.len())
        .into_iter()
        .filter(|entry| entry.count > 0)
        .collect()
}

/// Tasks created per UTC day, oldest first
pub fn creation_timeline(tasks: &[&Task]) -> Vec<TimelinePoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for task in tasks {
        if let Some(day) = dates::parse_day(&task.created_at) {
            *days.entry(day).or_default() += 1;
        }
    }

    days.into_iter()
        .map(|(date, count)| TimelinePoint { date, count })
        .collect()
}
