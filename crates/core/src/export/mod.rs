//! Spreadsheet export
//!
//! Building an export is split in two: the sheets are projected from a
//! snapshot as plain grids (pure, cheap to test), then the grids are encoded
//! into an xlsx workbook on a blocking worker.

mod rows;
mod sheet;
mod workbook;

pub use rows::*;
pub use sheet::*;
pub use workbook::*;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::analytics::Summary;
use crate::lookup::Lookup;
use crate::metadata::{Category, Tag};
use crate::task::Task;
use crate::{Error, Result};

/// Everything an export needs, owned so it can move to a worker thread.
///
/// Callers pass a snapshot; later changes to the store do not affect an
/// export that is already running.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub kind: ExportKind,
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    /// Evaluated once: overdue cutoff and the date in the filename
    pub now: DateTime<Utc>,
}

impl ExportRequest {
    pub fn new(
        kind: ExportKind,
        tasks: Vec<Task>,
        categories: Vec<Category>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            kind,
            tasks,
            categories,
            tags,
            now: Utc::now(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn filename(&self) -> String {
        self.kind.filename(self.now.date_naive())
    }

    /// Project the snapshot into sheet grids, in workbook order
    pub fn sheets(&self) -> Vec<Sheet> {
        let lookup = Lookup::new(&self.categories, &self.tags);
        let rows = to_detail_rows(&self.tasks, &lookup);

        match self.kind {
            ExportKind::Tasks => vec![detail_sheet(TASKS_SHEET, &rows)],
            ExportKind::Analytics => {
                let summary = Summary::compute(&self.tasks, &self.categories, self.now);
                vec![summary_sheet(&summary), detail_sheet(DETAIL_SHEET, &rows)]
            }
        }
    }

    /// Encode synchronously
    pub fn render(&self) -> Result<ExportArtifact> {
        let bytes = render_workbook(&self.sheets())?;
        Ok(ExportArtifact::new(self.filename(), bytes))
    }
}

/// Produce the artifact on a blocking worker.
///
/// This is the only await point of an export. It either completes or
/// fails; there is no partial result.
pub async fn export(request: ExportRequest) -> Result<ExportArtifact> {
    let kind = request.kind;
    let task_count = request.tasks.len();

    let result = tokio::task::spawn_blocking(move || request.render())
        .await
        .map_err(|e| Error::ExportTask(e.to_string()))?;

    match &result {
        Ok(artifact) => info!(
            "Exported {} task(s) as {} ({} bytes)",
            task_count,
            artifact.filename,
            artifact.bytes.len()
        ),
        Err(e) => error!("{:?} export failed: {}", kind, e),
    }
    result
}
