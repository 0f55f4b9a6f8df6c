use std::path::PathBuf;

use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File not found: {}", .path.display())]
    NotFound {
        path: PathBuf
    },
    #[error("Sheet [{}] could not be read: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Workbook [{}] contains no worksheets", .path.display())]
    EmptyWorkbook {
        path: PathBuf
    },
    #[error("Unsupported sheet format [{extension}], expected csv, xlsx, xlsm, xlsb, xls or ods")]
    UnsupportedFormat {
        extension: String
    },
    #[error(transparent)]
    Validation(#[from] ValidationError)
}

impl IngestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
