//! Error types for dataset ingestion.

use std::path::PathBuf;

use jst_model::DatasetKind;
use thiserror::Error;

/// Errors that can occur while loading and normalizing source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File system errors ===
    /// The input path resolves to neither a file nor a directory.
    #[error("{} is neither a file nor a directory", .path.display())]
    PathNotFound { path: PathBuf },

    /// A directory contained no loadable tabular files.
    #[error("no CSV/XLSX files found under {}", .path.display())]
    NoEligibleFiles { path: PathBuf },

    /// Failed to read a file or directory entry.
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing errors ===
    /// Failed to parse a delimited-text file with every candidate separator.
    #[error("failed to parse delimited file {}: {message}", .path.display())]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a spreadsheet file.
    #[error("failed to read spreadsheet {}: {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },

    // === Detection errors ===
    /// A required canonical column could not be located heuristically.
    #[error("could not auto-detect column for '{field}' in '{kind}' dataset")]
    ColumnDetection { field: String, kind: DatasetKind },

    // === DataFrame errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
