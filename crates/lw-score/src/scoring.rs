//! Beginner-suitability score.

use lw_core::{ScoringWeights, TimeOfDay};

use crate::RouteFeatures;

/// Weighted linear score in `[0, 100]`.
///
/// ```text
/// raw = 100
///     − w_distance      · |distance_km − target_km|
///     − w_elevation     · elev_gain_norm
///     − w_intersections · intersections_per_km
///     − w_signals       · signals_per_km
///     + w_lighting      · lighting_index        (night: + night_lighting_bonus)
///     + w_water_park    · water_park_ratio
/// score = clamp(raw, 0, 100)
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScoringEngine {
    pub weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Unclamped score.  Useful for explaining why a route hit a bound.
    pub fn raw_score(&self, features: &RouteFeatures, target_km: f64, time: TimeOfDay) -> f64 {
        let w = self.weights.for_time(time);
        100.0
            - w.distance * (features.distance_km - target_km).abs()
            - w.elevation * features.elev_gain_norm
            - w.intersections * features.intersections_per_km
            - w.signals * features.signals_per_km
            + w.lighting * features.lighting_index
            + w.water_park * features.water_park_ratio
    }

    /// Score clamped to `[0, 100]`.
    pub fn score(&self, features: &RouteFeatures, target_km: f64, time: TimeOfDay) -> f64 {
        self.raw_score(features, target_km, time).clamp(0.0, 100.0)
    }
}
