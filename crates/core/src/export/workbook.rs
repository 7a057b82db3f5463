//! Workbook encoding and the downloadable artifact

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::sheet::{Cell, Sheet};
use crate::{Error, Result};

pub const CONTENT_TYPE: &str = "application/octet-stream";
pub const EXTENSION: &str = "xlsx";

/// Which export the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Filtered task list, one "Tasks" sheet
    Tasks,
    /// "Summary" and "Detailed Tasks" sheets
    Analytics,
}

impl ExportKind {
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Tasks => "TaskExport",
            Self::Analytics => "AnalyticsExport",
        }
    }

    /// `<Prefix>_<YYYY-MM-DD>.xlsx`
    pub fn filename(&self, date: NaiveDate) -> String {
        format!(
            "{}_{}.{}",
            self.file_prefix(),
            date.format("%Y-%m-%d"),
            EXTENSION
        )
    }
}

/// Encode the sheets, in order, as one xlsx document
pub fn render_workbook(sheets: &[Sheet]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (index, row) in sheet.rows.iter().enumerate() {
            let is_header = sheet.is_header(index);
            let r = u32::try_from(index)
                .map_err(|_| Error::InvalidInput(format!("Too many rows in {}", sheet.name)))?;
            for (c, cell) in row.iter().enumerate() {
                let c = u16::try_from(c).map_err(|_| {
                    Error::InvalidInput(format!("Too many columns in {}", sheet.name))
                })?;
                match cell {
                    Cell::Text(value) if is_header => {
                        worksheet.write_string_with_format(r, c, value, &header)?;
                    }
                    Cell::Text(value) => {
                        worksheet.write_string(r, c, value)?;
                    }
                    Cell::Number(value) => {
                        worksheet.write_number(r, c, *value)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!("Rendered workbook with {} sheet(s), {} bytes", sheets.len(), bytes.len());
    Ok(bytes)
}

/// A finished export, ready to hand to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: CONTENT_TYPE,
            bytes,
        }
    }

    /// Write into `dir` under the artifact's filename.
    ///
    /// The bytes go to a temporary file first and are renamed into place,
    /// so a failed save never leaves a partial workbook behind.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let target = dir.join(&self.filename);
        let staging = dir.join(format!(".{}.partial", self.filename));

        if let Err(e) = tokio::fs::write(&staging, &self.bytes).await {
            discard(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            discard(&staging).await;
            return Err(e.into());
        }

        Ok(target)
    }
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove partial export {:?}: {}", path, e);
        }
    }
}
