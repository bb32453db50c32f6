//! Qualitative route badges.

use std::fmt;

use lw_core::BadgeRules;

use crate::RouteFeatures;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Badge {
    WellLit,
    FewIntersections,
    Flat,
    /// Given when no other badge applies.
    Basic,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Badge::WellLit          => "well-lit",
            Badge::FewIntersections => "few-intersections",
            Badge::Flat             => "flat",
            Badge::Basic            => "basic",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badges earned by `features`, in fixed order; `[Basic]` when none apply.
pub fn badges_from_features(features: &RouteFeatures, rules: &BadgeRules) -> Vec<Badge> {
    let mut badges = Vec::with_capacity(3);
    if features.lighting_index >= rules.well_lit_min {
        badges.push(Badge::WellLit);
    }
    if features.intersections_per_km <= rules.few_intersections_max {
        badges.push(Badge::FewIntersections);
    }
    if features.elev_gain_norm <= rules.flat_max {
        badges.push(Badge::Flat);
    }
    if badges.is_empty() {
        badges.push(Badge::Basic);
    }
    badges
}
