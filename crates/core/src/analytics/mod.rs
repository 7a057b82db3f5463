//! Aggregate analytics over a task collection
//!
//! Everything here is a pure function of its inputs plus one "now" instant,
//! so a report is internally consistent even when tasks cross their due
//! date while it is being computed.

mod charts;
mod summary;

pub use charts::*;
pub use summary::*;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metadata::Category;
use crate::task::Task;

/// Summary plus every chart series, computed against one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub status_distribution: Vec<StatusSlice>,
    pub category_distribution: Vec<CategoryCount>,
    pub overdue_by_category: Vec<CategoryCount>,
    pub timeline: Vec<TimelinePoint>,
}

impl AnalyticsReport {
    pub fn build(tasks: &[&Task], categories: &[Category], now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            summary: Summary::compute(tasks.iter().copied(), categories, now),
            status_distribution: status_distribution(tasks),
            category_distribution: category_distribution(tasks, categories),
            overdue_by_category: overdue_by_category(tasks, categories, now),
            timeline: creation_timeline(tasks),
        }
    }
}
