//! Geographic coordinate types and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Route geometry is exchanged at
//! 5-decimal precision (≈ 1.1 m at the equator), which `f32` cannot hold for
//! longitudes above 100°.
//!
//! # Flat-earth offsets
//!
//! [`GeoPoint::offset_m`] and [`GeoPoint::local_xy_m`] use a local
//! equirectangular approximation:
//!
//! ```text
//! 1° latitude  ≈ 111 111 m
//! 1° longitude ≈ 111 111 m × cos(latitude of the reference point)
//! ```
//!
//! This is only valid near the reference point at a few-kilometre scale (the
//! size of a jogging loop).  It degrades towards the poles and over long
//! distances; use [`GeoPoint::distance_m`] when accuracy matters.

/// Metres per degree of latitude used by the flat-earth approximation.
pub const METERS_PER_DEGREE: f64 = 111_111.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a `(longitude, latitude)` pair, the order used by route
    /// geometry and GeoJSON.
    #[inline]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    /// `(longitude, latitude)` pair.
    #[inline]
    pub fn lon_lat(self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Point displaced `north_m` metres north and `east_m` metres east, using
    /// the flat-earth approximation described in the module docs.
    pub fn offset_m(self, north_m: f64, east_m: f64) -> GeoPoint {
        let lat = self.lat + north_m / METERS_PER_DEGREE;
        let lon = self.lon + east_m / (METERS_PER_DEGREE * self.lat.to_radians().cos());
        GeoPoint { lat, lon }
    }

    /// Point at `radius_m` from `self` in direction `theta` (radians,
    /// 0 = north, clockwise towards east).
    #[inline]
    pub fn on_ring(self, radius_m: f64, theta: f64) -> GeoPoint {
        self.offset_m(radius_m * theta.cos(), radius_m * theta.sin())
    }

    /// Project `other` into local `(x = east, y = north)` metres relative to
    /// `self`.  Inverse of [`offset_m`](Self::offset_m).
    #[inline]
    pub fn local_xy_m(self, other: GeoPoint) -> (f64, f64) {
        let x = (other.lon - self.lon) * METERS_PER_DEGREE * self.lat.to_radians().cos();
        let y = (other.lat - self.lat) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Coordinates rounded to `decimals` places and scaled to integers, so
    /// they can be hashed and compared exactly.
    pub fn rounded_key(self, decimals: u32) -> (i64, i64) {
        let scale = 10f64.powi(decimals as i32);
        ((self.lat * scale).round() as i64, (self.lon * scale).round() as i64)
    }

    /// Approximate bounding-box check, cheaper than `distance_m` for quick
    /// rejection.
    #[inline]
    pub fn within_bbox(self, center: GeoPoint, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lon - center.lon).abs() <= half_deg
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Place ─────────────────────────────────────────────────────────────────────

/// A named location: a coordinate plus whatever the geocoder told us about it.
///
/// Produced by external place search; the recommender only reads `point` and
/// uses `name` as the prefix of route display names.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    pub point:   GeoPoint,
    pub id:      Option<String>,
    pub name:    Option<String>,
    pub address: Option<String>,
}

impl Place {
    /// An anonymous place at `point`.
    pub fn at(point: GeoPoint) -> Self {
        Self { point, id: None, name: None, address: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Display label: the name if known, otherwise the coordinate.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.point.to_string(),
        }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        GeoPoint::new(0.0, 0.0)
    }
}
