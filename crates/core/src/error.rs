//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The workbook could not be built or encoded.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Export task failed: {0}")]
    ExportTask(String),
}

impl Error {
    /// True for failures raised while producing an export artifact.
    pub fn is_export_failure(&self) -> bool {
        matches!(self, Error::Spreadsheet(_) | Error::ExportTask(_))
    }
}
