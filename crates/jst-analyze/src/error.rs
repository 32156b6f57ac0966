//! Error type for the analysis pipeline.

use jst_ingest::IngestError;
use thiserror::Error;

/// Errors from the load-through-report analysis pipeline.
///
/// Only load and detection failures are fatal; data-quality conditions
/// never surface here, they are reported as counts in the summary.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
