//! In-memory sheet grids, built before anything is encoded

use std::collections::BTreeSet;

use super::rows::{DetailRow, DETAIL_HEADERS};
use crate::analytics::{format_percent, Summary};

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAIL_SHEET: &str = "Detailed Tasks";
pub const TASKS_SHEET: &str = "Tasks";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn count(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

/// A named grid of cells; rows may have different lengths
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    /// Indices of rows rendered as column headers
    header_rows: BTreeSet<usize>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            header_rows: BTreeSet::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn push_header<const N: usize>(&mut self, titles: [&str; N]) {
        self.header_rows.insert(self.rows.len());
        self.rows.push(titles.iter().map(|t| Cell::text(*t)).collect());
    }

    pub fn is_header(&self, row: usize) -> bool {
        self.header_rows.contains(&row)
    }

    /// Text of the cell at `(row, col)`, if it is a text cell
    pub fn text_at(&self, row: usize, col: usize) -> Option<&str> {
        match self.rows.get(row)?.get(col)? {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Number at `(row, col)`, if it is a numeric cell
    pub fn number_at(&self, row: usize, col: usize) -> Option<f64> {
        match self.rows.get(row)?.get(col)? {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// Header row plus one row per task
pub fn detail_sheet(name: &str, rows: &[DetailRow]) -> Sheet {
    let mut sheet = Sheet::new(name);
    sheet.push_header(DETAIL_HEADERS);
    for row in rows {
        sheet.push_row(row.cells().iter().map(|v| Cell::text(*v)).collect());
    }
    sheet
}

/// Metric table, a blank separator row, then the category table
pub fn summary_sheet(summary: &Summary) -> Sheet {
    let total = summary.total;
    let mut sheet = Sheet::new(SUMMARY_SHEET);

    sheet.push_header(["Metric", "Count", "Percentage"]);
    sheet.push_row(vec![
        Cell::text("Total Tasks"),
        Cell::count(total),
        Cell::text(if total == 0 { "0%" } else { "100%" }),
    ]);
    for status in &summary.statuses {
        sheet.push_row(vec![
            Cell::text(status.label),
            Cell::count(status.count),
            Cell::text(format_percent(status.count, total)),
        ]);
    }
    sheet.push_row(vec![
        Cell::text("Overdue"),
        Cell::count(summary.overdue),
        Cell::Empty,
    ]);

    sheet.push_row(Vec::new());
    sheet.push_row(vec![Cell::text("Category Distribution")]);
    sheet.push_header(["Category", "Count", "Percentage"]);
    for category in &summary.categories {
        sheet.push_row(vec![
            Cell::text(category.name.as_str()),
            Cell::count(category.count),
            Cell::text(format_percent(category.count, total)),
        ]);
    }

    sheet
}
