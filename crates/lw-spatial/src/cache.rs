//! Bounded cache of fetched walk networks.
//!
//! # Swap discipline
//!
//! Cached networks are handed out as `Arc<WalkNetwork>` and never mutated.
//! Fetches run *outside* the lock; the result is inserted (or, for
//! [`NetworkCache::refresh`], swapped in) under a short lock, so a request
//! that already holds the old snapshot keeps using it undisturbed and no
//! caller waits on another caller's fetch.
//!
//! # Eviction
//!
//! The cache holds at most `capacity` networks.  Inserting into a full
//! cache drops the least recently used entry; outstanding `Arc`s to it stay
//! valid.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;

use lw_core::GeoPoint;

use crate::network::WalkNetwork;
use crate::provider::NetworkProvider;
use crate::SpatialResult;

/// Centers closer than this many decimal places share a cache entry
/// (4 decimals ≈ 11 m).
const KEY_DECIMALS: u32 = 4;

/// Default number of cached networks.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct CacheKey {
    center:   (i64, i64),
    radius_m: u32,
}

impl CacheKey {
    fn new(center: GeoPoint, radius_m: f64) -> Self {
        Self {
            center:   center.rounded_key(KEY_DECIMALS),
            radius_m: radius_m.round() as u32,
        }
    }
}

/// Caches networks per (rounded center, radius) in front of a provider.
pub struct NetworkCache<P: NetworkProvider> {
    provider: P,
    entries:  Mutex<LruCache<CacheKey, Arc<WalkNetwork>>>,
}

impl<P: NetworkProvider> NetworkCache<P> {
    /// A cache holding up to [`DEFAULT_CAPACITY`] networks.
    pub fn new(provider: P) -> Self {
        Self::with_capacity(provider, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(provider: P, capacity: NonZeroUsize) -> Self {
        Self { provider, entries: Mutex::new(LruCache::new(capacity)) }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Cached network for `(center, radius_m)`, fetching it on a miss.
    ///
    /// Two threads missing the same key concurrently may both fetch; the
    /// first insert wins and both get the same `Arc`.
    pub fn get_or_fetch(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<Arc<WalkNetwork>> {
        let key = CacheKey::new(center, radius_m);
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let fetched = Arc::new(self.provider.fetch(center, radius_m)?);
        let mut entries = self.lock();
        if let Some(winner) = entries.get(&key) {
            return Ok(Arc::clone(winner));
        }
        if let Some((_, evicted)) = entries.push(key, Arc::clone(&fetched)) {
            log::debug!("network cache full; evicted a {}-node network", evicted.node_count());
        }
        Ok(fetched)
    }

    /// Fetch a fresh network and replace the cached one.
    ///
    /// On fetch failure the old entry is kept.
    pub fn refresh(&self, center: GeoPoint, radius_m: f64) -> SpatialResult<Arc<WalkNetwork>> {
        let key = CacheKey::new(center, radius_m);
        let fresh = Arc::new(self.provider.fetch(center, radius_m)?);
        self.lock().put(key, Arc::clone(&fresh));
        log::info!("refreshed cached network around {center} (r={radius_m:.0} m)");
        Ok(fresh)
    }

    /// Drop every cached network.  Outstanding `Arc`s stay valid.
    pub fn invalidate_all(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, Arc<WalkNetwork>>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}
