//! Encoded polyline strings for route geometry.

use geo_types::{Coord, LineString};
use lw_core::GeoPoint;

use crate::{OutputError, OutputResult};

/// Coordinate precision of encoded route polylines (1e-5 degrees).
pub const POLYLINE_PRECISION: u32 = 5;

/// Encode `points` as a Google encoded polyline at 5-decimal precision.
///
/// An empty slice encodes to the empty string.
pub fn encode_polyline(points: &[GeoPoint]) -> OutputResult<String> {
    let line: LineString<f64> = points
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();
    polyline::encode_coordinates(line, POLYLINE_PRECISION)
        .map_err(|e| OutputError::Polyline(e.to_string()))
}

/// Decode a 5-decimal polyline back into points.
pub fn decode_polyline(encoded: &str) -> OutputResult<Vec<GeoPoint>> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| OutputError::Polyline(e.to_string()))?;
    Ok(line.coords().map(|c| GeoPoint::from_lon_lat(c.x, c.y)).collect())
}
