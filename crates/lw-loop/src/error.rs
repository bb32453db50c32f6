use lw_core::{GeoPoint, LwError};
use lw_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("cannot snap center {center} to the walk network: {source}")]
    CenterUnsnappable {
        center: GeoPoint,
        #[source]
        source: SpatialError,
    },

    #[error("invalid loop configuration: {0}")]
    Config(#[from] LwError),

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type LoopResult<T> = Result<T, LoopError>;
