//! Flat row type written by the CSV backend.

use lw_recommend::ScoredRoute;

use crate::OutputResult;
use crate::polyline::encode_polyline;

/// One ranked route, flattened for tabular export.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    /// 1-based position in the ranking.
    pub rank:           u32,
    pub route_id:       String,
    pub name:           String,
    pub start_lat:      f64,
    pub start_lon:      f64,
    pub distance_km:    f64,
    pub duration_min:   f64,
    pub score:          f64,
    pub lighting_index: f64,
    /// Empty when lighting was not measured from lamp data.
    pub lamps_per_km:   Option<f64>,
    /// Badge names joined with `;`.
    pub badges:         String,
    pub polyline:       String,
}

impl RouteRow {
    pub fn from_scored(rank: u32, route: &ScoredRoute) -> OutputResult<Self> {
        let badges: Vec<&str> = route.badges.iter().map(|b| b.as_str()).collect();
        Ok(Self {
            rank,
            route_id:       route.route_id.clone(),
            name:           route.name.clone(),
            start_lat:      route.start.point.lat,
            start_lon:      route.start.point.lon,
            distance_km:    route.features.distance_km,
            duration_min:   route.features.duration_min,
            score:          route.score,
            lighting_index: route.features.lighting_index,
            lamps_per_km:   route.features.lamps_per_km,
            badges:         badges.join(";"),
            polyline:       encode_polyline(&route.candidate.geometry)?,
        })
    }

    /// Rows for `routes` in ranking order.
    pub fn from_ranked(routes: &[ScoredRoute]) -> OutputResult<Vec<Self>> {
        routes
            .iter()
            .enumerate()
            .map(|(i, r)| Self::from_scored(i as u32 + 1, r))
            .collect()
    }
}
