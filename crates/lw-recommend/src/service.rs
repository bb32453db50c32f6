//! Async wrappers for the blocking edges of a request.
//!
//! Fetching a walk network and reading lamp data are the only steps that
//! touch slow external sources.  Both run on Tokio's blocking pool under a
//! deadline.  When the deadline passes the caller gets
//! [`RecommendError::Timeout`] immediately; the abandoned task finishes in
//! the background and its result is dropped without touching shared state.
//!
//! Generation and scoring themselves stay synchronous.  Callers inside an
//! async runtime should run [`Recommender::recommend`] via
//! `spawn_blocking` as well.
//!
//! [`Recommender::recommend`]: crate::Recommender::recommend

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lw_core::GeoPoint;
use lw_score::{LampSet, load_lamps_csv};
use lw_spatial::{NetworkCache, NetworkProvider, WalkNetwork};

use crate::{LampStore, RecommendError, RecommendResult};

/// Run `job` on the blocking pool, giving up after `timeout`.
async fn blocking_with_timeout<T, F>(what: &'static str, timeout: Duration, job: F) -> RecommendResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RecommendResult<T> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);
    match tokio::time::timeout(timeout, task).await {
        Err(_) => {
            log::warn!("{what} exceeded {timeout:?}; abandoning");
            Err(RecommendError::Timeout { what, after: timeout })
        }
        Ok(Err(join)) => Err(RecommendError::Task(join.to_string())),
        Ok(Ok(result)) => result,
    }
}

/// Fetch the walk network around `center` from `provider`.
pub async fn fetch_network<P>(
    provider: Arc<P>,
    center:   GeoPoint,
    radius_m: f64,
    timeout:  Duration,
) -> RecommendResult<WalkNetwork>
where
    P: NetworkProvider + 'static,
{
    blocking_with_timeout("network fetch", timeout, move || {
        provider.fetch(center, radius_m).map_err(RecommendError::NetworkFetch)
    })
    .await
}

/// Like [`fetch_network`] but served from (and stored into) `cache`.
pub async fn fetch_cached<P>(
    cache:    Arc<NetworkCache<P>>,
    center:   GeoPoint,
    radius_m: f64,
    timeout:  Duration,
) -> RecommendResult<Arc<WalkNetwork>>
where
    P: NetworkProvider + 'static,
{
    blocking_with_timeout("network fetch", timeout, move || {
        cache.get_or_fetch(center, radius_m).map_err(RecommendError::NetworkFetch)
    })
    .await
}

/// Read a lamp CSV.
pub async fn load_lamps(
    path:       PathBuf,
    lon_column: String,
    lat_column: String,
    timeout:    Duration,
) -> RecommendResult<LampSet> {
    blocking_with_timeout("lamp load", timeout, move || {
        Ok(load_lamps_csv(&path, &lon_column, &lat_column)?)
    })
    .await
}

/// Reload `store` from a lamp CSV.
///
/// On success the new set is swapped in and its size returned.  On failure
/// the store keeps whatever it held before.
pub async fn reload_lamps(
    store:      &LampStore,
    path:       PathBuf,
    lon_column: String,
    lat_column: String,
    timeout:    Duration,
) -> RecommendResult<usize> {
    match load_lamps(path, lon_column, lat_column, timeout).await {
        Ok(lamps) => {
            let n = lamps.len();
            store.replace(lamps);
            log::info!("lamp store now holds {n} lamps");
            Ok(n)
        }
        Err(e) => {
            log::warn!("keeping previous lamp data: {e}");
            Err(e)
        }
    }
}
