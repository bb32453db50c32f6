//! Error types for lw-output.

use thiserror::Error;

/// Errors that can occur when encoding or writing routes.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("polyline encode error: {0}")]
    Polyline(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
