//! Spatial-subsystem error type.

use thiserror::Error;

use lw_core::NodeId;

/// Errors produced by `lw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("network has no nodes")]
    EmptyNetwork,

    #[error("could not fetch walk network: {0}")]
    NetworkFetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
