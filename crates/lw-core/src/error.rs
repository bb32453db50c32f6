//! Core error type.
//!
//! Sub-crates define their own error enums (`SpatialError`, `LoopError`,
//! `ScoreError`, …) and wrap `LwError` where configuration or parsing
//! problems surface through them.

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `lw-core`.
#[derive(Debug, Error)]
pub enum LwError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `lw-core`.
pub type LwResult<T> = Result<T, LwError>;
