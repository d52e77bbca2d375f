//! Error types for the import pipeline.

use std::path::PathBuf;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Failures that abort an import pass.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Sheet {sheet:?} not found in {} (available: {available:?})", .path.display())]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },
    #[error("Cannot read workbook {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },
    #[error("Malformed {field} on row {row}: {value:?}")]
    DataFormat {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Cannot remove existing database {}: {source}", .path.display())]
    StaleStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A row-level problem: the row is skipped and the import goes on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("column {column} is not text: {value}")]
    NotText { column: usize, value: String },
    #[error("column {column} is not a flag: {value:?}")]
    NotAFlag { column: usize, value: String },
}
