//! Shared, swappable lamp data.

use std::sync::{Arc, RwLock};

use lw_score::LampSet;

/// Holds the current lamp set, if any.
///
/// Requests take a [`snapshot`](Self::snapshot) once and use it throughout,
/// so a concurrent [`replace`](Self::replace) never changes lamp data under
/// a running request.
#[derive(Default)]
pub struct LampStore {
    current: RwLock<Option<Arc<LampSet>>>,
}

impl LampStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lamps(lamps: LampSet) -> Self {
        Self { current: RwLock::new(Some(Arc::new(lamps))) }
    }

    pub fn snapshot(&self) -> Option<Arc<LampSet>> {
        self.current.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Swap in a new lamp set.  Returns the previous one.
    pub fn replace(&self, lamps: LampSet) -> Option<Arc<LampSet>> {
        let fresh = Arc::new(lamps);
        self.current
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .replace(fresh)
    }

    pub fn clear(&self) -> Option<Arc<LampSet>> {
        self.current.write().unwrap_or_else(|p| p.into_inner()).take()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().unwrap_or_else(|p| p.into_inner()).is_some()
    }
}
