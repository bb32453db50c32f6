//! Recommender configuration.
//!
//! # Design
//!
//! Every tunable the pipeline uses is a field on one of these structs and is
//! passed explicitly into the component that needs it at construction time.
//! There is no module-level mutable state: two requests with different
//! configs can run side by side.
//!
//! All structs implement `Default` with the values the service shipped with,
//! and (with the `serde` feature) deserialize with `#[serde(default)]` so a
//! config file only has to name what it overrides.

use crate::{LwError, LwResult, TimeOfDay};

// ── LoopConfig ────────────────────────────────────────────────────────────────

/// Upper bound accepted for `LoopConfig::candidate_count`.
pub const MAX_CANDIDATE_COUNT: usize = 1_000;

/// Upper bound accepted for `LoopConfig::trial_multiplier`.
pub const MAX_TRIAL_MULTIPLIER: usize = 100;

/// Parameters of loop candidate sampling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoopConfig {
    /// Target loop length in kilometres.  Default: 3.0.
    pub target_km: f64,

    /// Accepted relative deviation from the target.  0.10 accepts loops in
    /// `[0.9 × target, 1.1 × target]`.
    pub tolerance: f64,

    /// Radius (metres) of the walk network fetched around the center.
    /// Default: 2000.
    pub radius_m: f64,

    /// Desired number of accepted candidates per request.  Default: 6.
    pub candidate_count: usize,

    /// Trial budget as a multiple of `candidate_count`.  Default: 5.
    pub trial_multiplier: usize,

    /// Inclusive range of waypoints sampled per trial.  Default: 2..=3.
    pub min_waypoints: usize,
    pub max_waypoints: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_km:        3.0,
            tolerance:        0.10,
            radius_m:         2_000.0,
            candidate_count:  6,
            trial_multiplier: 5,
            min_waypoints:    2,
            max_waypoints:    3,
        }
    }
}

impl LoopConfig {
    /// Target length in metres.
    #[inline]
    pub fn target_m(&self) -> f64 {
        self.target_km * 1_000.0
    }

    /// Inclusive accepted length band `(low, high)` in metres.
    #[inline]
    pub fn band_m(&self) -> (f64, f64) {
        let t = self.target_m();
        (t * (1.0 - self.tolerance), t * (1.0 + self.tolerance))
    }

    /// `true` if a loop of `length_m` falls inside the tolerance band.
    #[inline]
    pub fn accepts(&self, length_m: f64) -> bool {
        let (low, high) = self.band_m();
        (low..=high).contains(&length_m)
    }

    /// Radius of the sampling ring: the loop is approximated as a circle
    /// whose circumference is the target length.
    #[inline]
    pub fn ring_radius_m(&self) -> f64 {
        self.target_m() / std::f64::consts::TAU
    }

    /// Maximum number of sampling trials before giving up.
    #[inline]
    pub fn max_trials(&self) -> usize {
        self.candidate_count.saturating_mul(self.trial_multiplier)
    }

    /// Copy with a different target distance.
    pub fn with_target_km(&self, target_km: f64) -> Self {
        Self { target_km, ..self.clone() }
    }

    pub fn validate(&self) -> LwResult<()> {
        if !(self.target_km.is_finite() && self.target_km > 0.0) {
            return Err(LwError::Config(format!(
                "target_km must be positive, got {}",
                self.target_km
            )));
        }
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(LwError::Config(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }
        if !(self.radius_m.is_finite() && self.radius_m > 0.0) {
            return Err(LwError::Config(format!(
                "radius_m must be positive, got {}",
                self.radius_m
            )));
        }
        if self.min_waypoints == 0 || self.min_waypoints > self.max_waypoints {
            return Err(LwError::Config(format!(
                "waypoint range {}..={} is empty or starts at zero",
                self.min_waypoints, self.max_waypoints
            )));
        }
        if self.candidate_count > MAX_CANDIDATE_COUNT {
            return Err(LwError::Config(format!(
                "candidate_count must be at most {MAX_CANDIDATE_COUNT}, got {}",
                self.candidate_count
            )));
        }
        if self.trial_multiplier > MAX_TRIAL_MULTIPLIER {
            return Err(LwError::Config(format!(
                "trial_multiplier must be at most {MAX_TRIAL_MULTIPLIER}, got {}",
                self.trial_multiplier
            )));
        }
        Ok(())
    }
}

// ── FeatureDefaults ───────────────────────────────────────────────────────────

/// Values used by the feature estimator for figures that are not yet derived
/// from data (elevation, intersections, signals, water/park overlap) and the
/// lighting estimate used when no lamp data is available.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureDefaults {
    /// Assumed beginner jogging pace.  Default: 9 min/km.
    pub pace_min_per_km:      f64,
    pub elev_gain_m:          f64,
    pub elev_gain_norm:       f64,
    pub intersections_per_km: f64,
    pub signals_per_km:       f64,
    pub water_park_ratio:     f64,
    /// Lighting index assumed in daytime.  Default: 0.5.
    pub lighting_day:         f64,
    /// Lighting index assumed at night.  Default: 0.7.
    pub lighting_night:       f64,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            pace_min_per_km:      9.0,
            elev_gain_m:          0.0,
            elev_gain_norm:       0.1,
            intersections_per_km: 0.6,
            signals_per_km:       0.2,
            water_park_ratio:     0.5,
            lighting_day:         0.5,
            lighting_night:       0.7,
        }
    }
}

impl FeatureDefaults {
    /// Default lighting index for the given time of day.
    #[inline]
    pub fn lighting_for(&self, time: TimeOfDay) -> f64 {
        if time.is_night() { self.lighting_night } else { self.lighting_day }
    }
}

// ── ScoringWeights ────────────────────────────────────────────────────────────

/// Weights of the beginner-suitability score.
///
/// ```text
/// score = 100 − distance·|d − target| − elevation·elev − intersections·ipk
///             − signals·spk + lighting·light + water_park·wp
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringWeights {
    pub distance:      f64,
    pub elevation:     f64,
    pub intersections: f64,
    pub signals:       f64,
    pub lighting:      f64,
    pub water_park:    f64,
    /// Added to `lighting` at night.  Default: 10.
    pub night_lighting_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance:             25.0,
            elevation:            20.0,
            intersections:        15.0,
            signals:              10.0,
            lighting:             20.0,
            water_park:           10.0,
            night_lighting_bonus: 10.0,
        }
    }
}

impl ScoringWeights {
    /// Weights in effect for `time`: at night the lighting weight grows by
    /// `night_lighting_bonus`.
    pub fn for_time(&self, time: TimeOfDay) -> ScoringWeights {
        let mut w = self.clone();
        if time.is_night() {
            w.lighting += self.night_lighting_bonus;
        }
        w
    }
}

// ── LightingConfig ────────────────────────────────────────────────────────────

/// Parameters of the lamp proximity join.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightingConfig {
    /// A lamp lights the route if it lies within this many metres of any
    /// route segment.  Default: 25 m.
    pub buffer_m: f64,

    /// Lamp density at which the lighting index saturates at 1.0.
    /// Default: 30 lamps/km (one lamp every ~33 m).
    pub saturation_lamps_per_km: f64,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self { buffer_m: 25.0, saturation_lamps_per_km: 30.0 }
    }
}

// ── BadgeRules ────────────────────────────────────────────────────────────────

/// Thresholds for qualitative route badges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BadgeRules {
    /// `lighting_index >= well_lit_min` → "well-lit".
    pub well_lit_min:          f64,
    /// `intersections_per_km <= few_intersections_max` → "few-intersections".
    pub few_intersections_max: f64,
    /// `elev_gain_norm <= flat_max` → "flat".
    pub flat_max:              f64,
}

impl Default for BadgeRules {
    fn default() -> Self {
        Self { well_lit_min: 0.6, few_intersections_max: 0.7, flat_max: 0.2 }
    }
}

// ── FallbackPolicy ────────────────────────────────────────────────────────────

/// What to do when loop sampling exhausts its budget without a candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackPolicy {
    /// Return an empty result and let the caller decide.
    #[default]
    None,
    /// Try an out-and-back route (run to a turnaround point and back).
    OutAndBack,
}

// ── RecommendConfig ───────────────────────────────────────────────────────────

/// Top-level recommender configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the recommender builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendConfig {
    pub loops:    LoopConfig,
    pub features: FeatureDefaults,
    pub weights:  ScoringWeights,
    pub lighting: LightingConfig,
    pub badges:   BadgeRules,

    /// Number of routes returned per request.  Default: 3.
    pub top_k: usize,

    pub fallback: FallbackPolicy,

    /// Upper bound on network fetch and lamp loading, in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Master RNG seed.  `None` seeds each request from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            loops:            LoopConfig::default(),
            features:         FeatureDefaults::default(),
            weights:          ScoringWeights::default(),
            lighting:         LightingConfig::default(),
            badges:           BadgeRules::default(),
            top_k:            3,
            fallback:         FallbackPolicy::None,
            fetch_timeout_ms: 30_000,
            seed:             None,
        }
    }
}

impl RecommendConfig {
    pub fn validate(&self) -> LwResult<()> {
        self.loops.validate()?;
        if self.top_k == 0 {
            return Err(LwError::Config("top_k must be at least 1".into()));
        }
        if !(self.lighting.buffer_m > 0.0 && self.lighting.saturation_lamps_per_km > 0.0) {
            return Err(LwError::Config(
                "lighting buffer and saturation density must be positive".into(),
            ));
        }
        if !(self.features.pace_min_per_km > 0.0) {
            return Err(LwError::Config("pace_min_per_km must be positive".into()));
        }
        Ok(())
    }

    /// Fetch/load timeout as a `Duration`.
    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }
}
