//! Network providers: where walk graphs come from.
//!
//! The recommender never builds graphs itself; it asks a [`NetworkProvider`]
//! for the walkable network around a center point.  Two providers ship with
//! the crate:
//!
//! | Provider        | Source                                               |
//! |-----------------|------------------------------------------------------|
//! | [`ClipProvider`]| A pre-loaded city-wide network, clipped per request  |
//! | `PbfProvider`   | An OSM PBF file (feature = `"osm"` only)             |
//!
//! Fetching is the one blocking step of a request.  Providers are plain
//! synchronous code; callers that need a deadline wrap them (see
//! `lw_recommend::service`).

use std::sync::Arc;

use lw_core::GeoPoint;

use crate::network::WalkNetwork;
use crate::{SpatialError, SpatialResult};

/// Supplies the walkable graph within `radius_m` of `center`.
pub trait NetworkProvider: Send + Sync {
    /// Fetch the network.  An unreachable source or a result with no nodes
    /// is reported as [`SpatialError::NetworkFetch`].
    fn fetch(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<WalkNetwork>;
}

impl<P: NetworkProvider + ?Sized> NetworkProvider for Arc<P> {
    fn fetch(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<WalkNetwork> {
        (**self).fetch(center, radius_m)
    }
}

// ── ClipProvider ──────────────────────────────────────────────────────────────

/// Serves requests from one large in-memory network by clipping it to the
/// requested radius.
pub struct ClipProvider {
    base: Arc<WalkNetwork>,
}

impl ClipProvider {
    pub fn new(base: Arc<WalkNetwork>) -> Self {
        Self { base }
    }

    /// The full, unclipped network.
    pub fn base(&self) -> &Arc<WalkNetwork> {
        &self.base
    }
}

impl NetworkProvider for ClipProvider {
    fn fetch(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<WalkNetwork> {
        let clipped = self.base.clip(center, radius_m);
        if clipped.is_empty() {
            return Err(SpatialError::NetworkFetch(format!(
                "no walkable nodes within {radius_m:.0} m of {center}"
            )));
        }
        log::debug!(
            "clipped network around {center}: {} nodes, {} edges",
            clipped.node_count(),
            clipped.edge_count()
        );
        Ok(clipped)
    }
}

// ── PbfProvider ───────────────────────────────────────────────────────────────

/// Loads the walk network from an OSM PBF extract on every fetch.
///
/// Pair with [`NetworkCache`](crate::NetworkCache) to avoid re-reading the
/// file for repeated centers.
#[cfg(feature = "osm")]
pub struct PbfProvider {
    path: std::path::PathBuf,
}

#[cfg(feature = "osm")]
impl PbfProvider {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "osm")]
impl NetworkProvider for PbfProvider {
    fn fetch(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<WalkNetwork> {
        let net = crate::osm::load_walk_network(&self.path, Some((center, radius_m)))?;
        if net.is_empty() {
            return Err(SpatialError::NetworkFetch(format!(
                "{} has no walkable ways within {radius_m:.0} m of {center}",
                self.path.display()
            )));
        }
        Ok(net)
    }
}
