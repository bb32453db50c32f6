use thiserror::Error;

/// Lamp data could not be loaded.
///
/// Never fatal to a recommendation: the pipeline logs the error and keeps
/// the default lighting estimate.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("lamp CSV has no {0:?} column")]
    MissingColumn(String),

    #[error("lamp CSV has no usable rows ({skipped} skipped)")]
    NoLamps { skipped: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
