//! Order-preserving deduplication of located items.
//!
//! Two items are duplicates when their coordinates, rounded to
//! [`DEDUP_DECIMALS`] places, are equal.  Five decimals is ≈ 1.1 m at the
//! equator and coarser in longitude towards the poles; the grid is
//! latitude-dependent by construction and is kept that way so results match
//! the place-search behaviour callers already rely on.

use rustc_hash::FxHashSet;

use crate::{GeoPoint, Place};

/// Rounding precision used to decide whether two points coincide.
pub const DEDUP_DECIMALS: u32 = 5;

/// Anything with a single representative coordinate.
pub trait Located {
    fn position(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    #[inline]
    fn position(&self) -> GeoPoint {
        *self
    }
}

impl Located for Place {
    #[inline]
    fn position(&self) -> GeoPoint {
        self.point
    }
}

/// Drop every item whose rounded coordinate was already seen.
///
/// The first occurrence wins and the relative order of survivors is
/// unchanged.
pub fn dedup_points<T: Located>(items: Vec<T>) -> Vec<T> {
    let mut seen: FxHashSet<(i64, i64)> = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.position().rounded_key(DEDUP_DECIMALS)))
        .collect()
}
