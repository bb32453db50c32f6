//! Street-lamp data and the lighting proximity join.
//!
//! # CSV format
//!
//! Any CSV with a header row.  The caller names the longitude and latitude
//! columns; other columns are ignored.
//!
//! ```csv
//! id,district,lon,lat
//! 1,Gangnam,127.0276,37.4979
//! 2,Gangnam,127.0281,37.4983
//! ```
//!
//! Rows whose coordinates do not parse or lie outside WGS-84 range are
//! skipped and counted.
//!
//! # Join
//!
//! A lamp lights the route when its flat-earth distance to any route segment
//! is at most `buffer_m`.  Each lamp counts once, however many segments it
//! is near.  The index saturates at `saturation_lamps_per_km`:
//!
//! ```text
//! lamps_per_km   = lamps_in_buffer / route_km
//! lighting_index = min(1, lamps_per_km / saturation_lamps_per_km)
//! ```

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashSet;

use lw_core::{GeoPoint, LightingConfig, METERS_PER_DEGREE};

use crate::{ScoreError, ScoreResult};

/// Routes shorter than this keep their default lighting.
const MIN_ROUTE_M: f64 = 1.0;

// ── LampSet ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct LampEntry {
    point: [f64; 2], // [lat, lon]
    idx:   u32,
}

impl RTreeObject for LampEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Lamp positions with an R-tree for buffer queries.
///
/// Immutable once built; share as `Arc<LampSet>`.
pub struct LampSet {
    lamps: Vec<GeoPoint>,
    index: RTree<LampEntry>,
}

impl LampSet {
    pub fn from_points(lamps: Vec<GeoPoint>) -> Self {
        let entries = lamps
            .iter()
            .enumerate()
            .map(|(i, p)| LampEntry { point: [p.lat, p.lon], idx: i as u32 })
            .collect();
        Self { index: RTree::bulk_load(entries), lamps }
    }

    pub fn len(&self) -> usize {
        self.lamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lamps.is_empty()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.lamps
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load lamp positions from a CSV file.
pub fn load_lamps_csv(path: &Path, lon_column: &str, lat_column: &str) -> ScoreResult<LampSet> {
    let file = std::fs::File::open(path)?;
    let lamps = load_lamps_reader(file, lon_column, lat_column)?;
    log::info!("loaded {} lamps from {}", lamps.len(), path.display());
    Ok(lamps)
}

/// Like [`load_lamps_csv`] but accepts any `Read` source.
pub fn load_lamps_reader<R: Read>(
    reader:     R,
    lon_column: &str,
    lat_column: &str,
) -> ScoreResult<LampSet> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let lon_idx = column_index(&headers, lon_column)?;
    let lat_idx = column_index(&headers, lat_column)?;

    let mut lamps = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        match parse_point(&record, lon_idx, lat_idx) {
            Some(p) => lamps.push(p),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("skipped {skipped} lamp rows with unusable coordinates");
    }
    if lamps.is_empty() {
        return Err(ScoreError::NoLamps { skipped });
    }
    Ok(LampSet::from_points(lamps))
}

fn column_index(headers: &StringRecord, name: &str) -> ScoreResult<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScoreError::MissingColumn(name.to_string()))
}

fn parse_point(record: &StringRecord, lon_idx: usize, lat_idx: usize) -> Option<GeoPoint> {
    let lon: f64 = record.get(lon_idx)?.parse().ok()?;
    let lat: f64 = record.get(lat_idx)?.parse().ok()?;
    let valid = lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0;
    valid.then(|| GeoPoint::new(lat, lon))
}

// ── Proximity join ────────────────────────────────────────────────────────────

/// Lighting measured from lamp data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightingEstimate {
    pub lighting_index: f64,
    pub lamps_per_km:   f64,
    /// Distinct lamps within the buffer.
    pub lamp_count:     usize,
}

/// Measure lighting along `geometry` from `lamps`.
///
/// Returns `None` for a geometry with fewer than two points or shorter than
/// a metre; the caller keeps its default lighting.
pub fn refine_lighting(
    geometry: &[GeoPoint],
    lamps:    &LampSet,
    config:   &LightingConfig,
) -> Option<LightingEstimate> {
    if geometry.len() < 2 {
        return None;
    }
    let length_m: f64 = geometry.windows(2).map(|w| w[0].distance_m(w[1])).sum();
    if length_m < MIN_ROUTE_M {
        return None;
    }

    let origin = geometry[0];
    let buffer = config.buffer_m;
    let d_lat = buffer / METERS_PER_DEGREE;
    let d_lon = buffer / (METERS_PER_DEGREE * origin.lat.to_radians().cos());

    let mut lit: FxHashSet<u32> = FxHashSet::default();
    for seg in geometry.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let envelope = AABB::from_corners(
            [a.lat.min(b.lat) - d_lat, a.lon.min(b.lon) - d_lon],
            [a.lat.max(b.lat) + d_lat, a.lon.max(b.lon) + d_lon],
        );
        let a_xy = origin.local_xy_m(a);
        let b_xy = origin.local_xy_m(b);
        for lamp in lamps.index.locate_in_envelope(&envelope) {
            if lit.contains(&lamp.idx) {
                continue;
            }
            let p_xy = origin.local_xy_m(lamps.lamps[lamp.idx as usize]);
            if point_segment_distance(p_xy, a_xy, b_xy) <= buffer {
                lit.insert(lamp.idx);
            }
        }
    }

    let lamps_per_km = lit.len() as f64 / (length_m / 1_000.0);
    Some(LightingEstimate {
        lighting_index: (lamps_per_km / config.saturation_lamps_per_km).min(1.0),
        lamps_per_km,
        lamp_count: lit.len(),
    })
}

/// Euclidean distance from `p` to segment `a–b` in local metres.
fn point_segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
