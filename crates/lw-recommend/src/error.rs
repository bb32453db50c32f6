use std::time::Duration;

use lw_core::LwError;
use lw_loop::LoopError;
use lw_score::ScoreError;
use lw_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("recommender configuration error: {0}")]
    Config(#[from] LwError),

    #[error("walk network unavailable: {0}")]
    NetworkFetch(#[source] SpatialError),

    #[error("{what} timed out after {after:?}")]
    Timeout {
        what:  &'static str,
        after: Duration,
    },

    #[error("loop generation failed: {0}")]
    Generation(#[from] LoopError),

    #[error("lamp data unavailable: {0}")]
    LampData(#[from] ScoreError),

    #[error("background task failed: {0}")]
    Task(String),
}

pub type RecommendResult<T> = Result<T, RecommendError>;
