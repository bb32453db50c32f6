//! Route features and the baseline feature estimator.
//!
//! Only distance and duration are derived from the route itself.  Elevation,
//! intersection and signal density, and water/park overlap come from
//! [`FeatureDefaults`]; lighting starts from the time-of-day default and may
//! be replaced by [`refine_lighting`](crate::refine_lighting) when lamp data
//! is available.

use lw_core::{FeatureDefaults, TimeOfDay};

use crate::LightingEstimate;

/// Measurable properties of one route.
///
/// Serialized field names follow the response format (`dist_km`,
/// `duration_min_est`, …).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteFeatures {
    #[cfg_attr(feature = "serde", serde(rename = "dist_km"))]
    pub distance_km: f64,

    #[cfg_attr(feature = "serde", serde(rename = "duration_min_est"))]
    pub duration_min: f64,

    pub elev_gain_m: f64,

    /// Normalised elevation gain in `[0, 1]`.
    pub elev_gain_norm: f64,

    pub intersections_per_km: f64,
    pub signals_per_km: f64,

    /// Lighting quality in `[0, 1]`.
    pub lighting_index: f64,

    /// Lamp density measured from lamp data; `None` while the lighting index
    /// is still the time-of-day default.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub lamps_per_km: Option<f64>,

    /// Share of the route along water or parks, in `[0, 1]`.
    pub water_park_ratio: f64,
}

impl RouteFeatures {
    /// Copy with lighting taken from a lamp-data estimate.
    pub fn with_lighting(mut self, estimate: &LightingEstimate) -> Self {
        self.lighting_index = estimate.lighting_index;
        self.lamps_per_km = Some(estimate.lamps_per_km);
        self
    }

    /// `true` once lighting reflects lamp data rather than the default.
    pub fn has_measured_lighting(&self) -> bool {
        self.lamps_per_km.is_some()
    }
}

/// Produces [`RouteFeatures`] from a route length.
#[derive(Clone, Debug, Default)]
pub struct FeatureEstimator {
    pub defaults: FeatureDefaults,
}

impl FeatureEstimator {
    pub fn new(defaults: FeatureDefaults) -> Self {
        Self { defaults }
    }

    /// Baseline features for a route of `length_m` metres run at `time`.
    pub fn estimate(&self, length_m: f64, time: TimeOfDay) -> RouteFeatures {
        let d = &self.defaults;
        let distance_km = length_m.max(0.0) / 1_000.0;
        RouteFeatures {
            distance_km,
            duration_min:         distance_km * d.pace_min_per_km,
            elev_gain_m:          d.elev_gain_m,
            elev_gain_norm:       d.elev_gain_norm,
            intersections_per_km: d.intersections_per_km,
            signals_per_km:       d.signals_per_km,
            lighting_index:       d.lighting_for(time).clamp(0.0, 1.0),
            lamps_per_km:         None,
            water_park_ratio:     d.water_park_ratio.clamp(0.0, 1.0),
        }
    }
}
