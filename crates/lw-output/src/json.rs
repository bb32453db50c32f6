//! JSON response items.
//!
//! The shape matches what route clients consume:
//!
//! ```json
//! {
//!   "routes": [{
//!     "route_id": "loop_0_3fa91c",
//!     "name": "Gangnam Station loop #1",
//!     "start": { "lat": 37.4979, "lng": 127.0276, "place_id": null, ... },
//!     "polyline": "...",
//!     "features": { "dist_km": 3.02, "duration_min_est": 40.3, ... },
//!     "scores": { "beginner": 84.6 },
//!     "badges": ["well-lit", "flat"]
//!   }]
//! }
//! ```

use std::collections::BTreeMap;

use lw_core::Place;
use lw_recommend::{Recommendation, ScoredRoute};
use lw_score::{Badge, RouteFeatures};
use serde::{Deserialize, Serialize};

use crate::OutputResult;
use crate::polyline::encode_polyline;

/// Key of the beginner score in [`RouteItem::scores`].
pub const BEGINNER_SCORE: &str = "beginner";

/// Start location of a route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartPoint {
    pub lat:      f64,
    pub lng:      f64,
    pub place_id: Option<String>,
    pub name:     Option<String>,
    pub address:  Option<String>,
}

impl From<&Place> for StartPoint {
    fn from(place: &Place) -> Self {
        Self {
            lat:      place.point.lat,
            lng:      place.point.lon,
            place_id: place.id.clone(),
            name:     place.name.clone(),
            address:  place.address.clone(),
        }
    }
}

/// One recommended route as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteItem {
    pub route_id: String,
    pub name:     String,
    pub start:    StartPoint,
    pub polyline: String,
    pub features: RouteFeatures,
    pub scores:   BTreeMap<String, f64>,
    pub badges:   Vec<Badge>,
}

impl RouteItem {
    pub fn from_scored(route: &ScoredRoute) -> OutputResult<Self> {
        Ok(Self {
            route_id: route.route_id.clone(),
            name:     route.name.clone(),
            start:    StartPoint::from(&route.start),
            polyline: encode_polyline(&route.candidate.geometry)?,
            features: route.features.clone(),
            scores:   BTreeMap::from([(BEGINNER_SCORE.to_owned(), route.score)]),
            badges:   route.badges.clone(),
        })
    }

    pub fn beginner_score(&self) -> Option<f64> {
        self.scores.get(BEGINNER_SCORE).copied()
    }
}

/// Top-level response body: ranked routes, best first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routes: Vec<RouteItem>,
}

impl RouteResponse {
    pub fn from_routes(routes: &[ScoredRoute]) -> OutputResult<Self> {
        let routes = routes.iter().map(RouteItem::from_scored).collect::<OutputResult<_>>()?;
        Ok(Self { routes })
    }

    pub fn from_recommendation(rec: &Recommendation) -> OutputResult<Self> {
        Self::from_routes(&rec.routes)
    }

    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
