//! Unit tests for lw-score.

use lw_core::{FeatureDefaults, TimeOfDay};

use crate::{FeatureEstimator, RouteFeatures};

/// Baseline daytime features for a route of `km` kilometres.
fn features(km: f64) -> RouteFeatures {
    FeatureEstimator::new(FeatureDefaults::default()).estimate(km * 1_000.0, TimeOfDay::Day)
}

// ── FeatureEstimator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod estimator {
    use super::*;

    #[test]
    fn day_defaults() {
        let f = features(3.0);
        assert_eq!(f.distance_km, 3.0);
        assert_eq!(f.duration_min, 27.0);
        assert_eq!(f.elev_gain_m, 0.0);
        assert_eq!(f.elev_gain_norm, 0.1);
        assert_eq!(f.intersections_per_km, 0.6);
        assert_eq!(f.signals_per_km, 0.2);
        assert_eq!(f.lighting_index, 0.5);
        assert_eq!(f.water_park_ratio, 0.5);
        assert!(f.lamps_per_km.is_none());
        assert!(!f.has_measured_lighting());
    }

    #[test]
    fn night_lighting_default() {
        let f = FeatureEstimator::default().estimate(2_500.0, TimeOfDay::Night);
        assert_eq!(f.lighting_index, 0.7);
        assert_eq!(f.distance_km, 2.5);
    }

    #[test]
    fn custom_pace() {
        let est = FeatureEstimator::new(FeatureDefaults {
            pace_min_per_km: 6.0,
            ..FeatureDefaults::default()
        });
        assert_eq!(est.estimate(5_000.0, TimeOfDay::Day).duration_min, 30.0);
    }

    #[test]
    fn with_lighting_replaces_default() {
        let est = crate::LightingEstimate { lighting_index: 0.9, lamps_per_km: 27.0, lamp_count: 81 };
        let f = features(3.0).with_lighting(&est);
        assert_eq!(f.lighting_index, 0.9);
        assert_eq!(f.lamps_per_km, Some(27.0));
        assert!(f.has_measured_lighting());
    }
}

// ── ScoringEngine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use super::*;
    use crate::ScoringEngine;

    #[test]
    fn on_target_defaults_clamp_to_100() {
        let engine = ScoringEngine::default();
        let f = features(3.0);
        assert!((engine.raw_score(&f, 3.0, TimeOfDay::Day) - 102.0).abs() < 1e-9);
        assert_eq!(engine.score(&f, 3.0, TimeOfDay::Day), 100.0);
    }

    #[test]
    fn two_km_off_target_scores_52() {
        let engine = ScoringEngine::default();
        let s = engine.score(&features(5.0), 3.0, TimeOfDay::Day);
        assert!((s - 52.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn night_adds_ten_times_lighting() {
        let engine = ScoringEngine::default();
        for lighting in [0.0, 0.3, 0.5, 1.0] {
            let f = RouteFeatures { lighting_index: lighting, ..features(5.0) };
            let day = engine.score(&f, 3.0, TimeOfDay::Day);
            let night = engine.score(&f, 3.0, TimeOfDay::Night);
            assert!((night - day - 10.0 * lighting).abs() < 1e-9);
        }
    }

    #[test]
    fn monotone_in_each_feature() {
        let engine = ScoringEngine::default();
        let base = features(4.0);
        let s = |f: &RouteFeatures| engine.score(f, 3.0, TimeOfDay::Day);
        let b = s(&base);

        assert!(s(&RouteFeatures { lighting_index: 0.9, ..base.clone() }) >= b);
        assert!(s(&RouteFeatures { water_park_ratio: 0.9, ..base.clone() }) >= b);
        assert!(s(&RouteFeatures { intersections_per_km: 2.0, ..base.clone() }) <= b);
        assert!(s(&RouteFeatures { signals_per_km: 1.0, ..base.clone() }) <= b);
        assert!(s(&RouteFeatures { elev_gain_norm: 0.8, ..base.clone() }) <= b);
        assert!(s(&RouteFeatures { distance_km: 5.0, ..base.clone() }) <= b);
    }

    #[test]
    fn distance_deviation_strictly_lowers_score_until_floor() {
        let engine = ScoringEngine::default();
        let target = 7.0;
        let below_cap = RouteFeatures {
            lighting_index:   0.0,
            water_park_ratio: 0.0,
            ..features(target)
        };
        for sign in [1.0, -1.0] {
            let mut prev = engine.score(&below_cap, target, TimeOfDay::Day);
            assert!(prev < 100.0 && prev > 0.0, "on-target score {prev} is clamped");
            let mut floored = false;
            for step in 1..=24 {
                let dev = 0.25 * f64::from(step);
                let f = RouteFeatures { distance_km: target + sign * dev, ..below_cap.clone() };
                let s = engine.score(&f, target, TimeOfDay::Day);
                if prev > 0.0 {
                    assert!(s < prev, "deviation {dev}: {s} !< {prev}");
                } else {
                    assert_eq!(s, 0.0, "deviation {dev} left the floor");
                }
                floored |= s == 0.0;
                prev = s;
            }
            assert!(floored, "6 km off target should reach 0");
        }
    }

    #[test]
    fn always_within_bounds() {
        let engine = ScoringEngine::default();
        let awful = RouteFeatures {
            distance_km:          30.0,
            elev_gain_norm:       1.0,
            intersections_per_km: 10.0,
            signals_per_km:       10.0,
            lighting_index:       0.0,
            water_park_ratio:     0.0,
            ..features(30.0)
        };
        let great = RouteFeatures {
            elev_gain_norm:       0.0,
            intersections_per_km: 0.0,
            signals_per_km:       0.0,
            lighting_index:       1.0,
            water_park_ratio:     1.0,
            ..features(3.0)
        };
        for time in [TimeOfDay::Day, TimeOfDay::Night] {
            assert_eq!(engine.score(&awful, 3.0, time), 0.0);
            assert_eq!(engine.score(&great, 3.0, time), 100.0);
        }
    }
}

// ── Badges ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod badges {
    use lw_core::BadgeRules;

    use super::*;
    use crate::{Badge, badges_from_features};

    #[test]
    fn day_defaults() {
        let b = badges_from_features(&features(3.0), &BadgeRules::default());
        assert_eq!(b, vec![Badge::FewIntersections, Badge::Flat]);
    }

    #[test]
    fn night_defaults_are_well_lit() {
        let f = FeatureEstimator::default().estimate(3_000.0, TimeOfDay::Night);
        let b = badges_from_features(&f, &BadgeRules::default());
        assert_eq!(b, vec![Badge::WellLit, Badge::FewIntersections, Badge::Flat]);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let f = RouteFeatures {
            lighting_index:       0.6,
            intersections_per_km: 0.7,
            elev_gain_norm:       0.2,
            ..features(3.0)
        };
        assert_eq!(badges_from_features(&f, &BadgeRules::default()).len(), 3);
    }

    #[test]
    fn basic_when_nothing_applies() {
        let f = RouteFeatures {
            lighting_index:       0.1,
            intersections_per_km: 3.0,
            elev_gain_norm:       0.9,
            ..features(3.0)
        };
        let b = badges_from_features(&f, &BadgeRules::default());
        assert_eq!(b, vec![Badge::Basic]);
        assert_eq!(b[0].to_string(), "basic");
    }

    #[test]
    fn labels() {
        assert_eq!(Badge::WellLit.as_str(), "well-lit");
        assert_eq!(Badge::FewIntersections.as_str(), "few-intersections");
        assert_eq!(Badge::Flat.as_str(), "flat");
    }
}

// ── Lighting ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lighting {
    use std::io::Cursor;

    use lw_core::{GeoPoint, LightingConfig, METERS_PER_DEGREE};

    use crate::{LampSet, ScoreError, load_lamps_reader, refine_lighting};

    /// Point `north_m` metres north of the equator at longitude `lon`.
    fn at(lon: f64, north_m: f64) -> GeoPoint {
        GeoPoint::new(north_m / METERS_PER_DEGREE, lon)
    }

    fn route() -> Vec<GeoPoint> {
        // Two segments along the equator, ~556 m each.
        vec![at(10.000, 0.0), at(10.005, 0.0), at(10.010, 0.0)]
    }

    fn route_km(geometry: &[GeoPoint]) -> f64 {
        geometry.windows(2).map(|w| w[0].distance_m(w[1])).sum::<f64>() / 1_000.0
    }

    #[test]
    fn counts_only_lamps_inside_buffer() {
        let mut lamps: Vec<GeoPoint> = (0..10).map(|i| at(10.0005 + i as f64 * 0.0009, 10.0)).collect();
        lamps.extend((0..5).map(|i| at(10.001 + i as f64 * 0.001, 40.0)));
        let set = LampSet::from_points(lamps);

        let geometry = route();
        let est = refine_lighting(&geometry, &set, &LightingConfig::default()).unwrap();
        assert_eq!(est.lamp_count, 10);
        assert!((est.lamps_per_km - 10.0 / route_km(&geometry)).abs() < 1e-9);
        assert!((est.lighting_index - est.lamps_per_km / 30.0).abs() < 1e-9);
    }

    #[test]
    fn lamp_near_shared_vertex_counts_once() {
        let set = LampSet::from_points(vec![at(10.005, 5.0)]);
        let est = refine_lighting(&route(), &set, &LightingConfig::default()).unwrap();
        assert_eq!(est.lamp_count, 1);
    }

    #[test]
    fn dense_lamps_saturate() {
        let lamps = (0..200).map(|i| at(10.0 + i as f64 * 0.00005, 3.0)).collect();
        let set = LampSet::from_points(lamps);
        let est = refine_lighting(&route(), &set, &LightingConfig::default()).unwrap();
        assert_eq!(est.lighting_index, 1.0);
        assert!(est.lamps_per_km > 30.0);
    }

    #[test]
    fn no_nearby_lamps_is_zero() {
        let set = LampSet::from_points(vec![at(11.0, 0.0)]);
        let est = refine_lighting(&route(), &set, &LightingConfig::default()).unwrap();
        assert_eq!(est.lamp_count, 0);
        assert_eq!(est.lighting_index, 0.0);
    }

    #[test]
    fn degenerate_geometry_keeps_default() {
        let set = LampSet::from_points(vec![at(10.0, 0.0)]);
        let cfg = LightingConfig::default();
        assert!(refine_lighting(&[], &set, &cfg).is_none());
        assert!(refine_lighting(&[at(10.0, 0.0)], &set, &cfg).is_none());
        assert!(refine_lighting(&[at(10.0, 0.0), at(10.0, 0.0)], &set, &cfg).is_none());
    }

    #[test]
    fn wider_buffer_catches_more() {
        let lamps = vec![at(10.002, 10.0), at(10.004, 40.0)];
        let set = LampSet::from_points(lamps);
        let narrow = refine_lighting(&route(), &set, &LightingConfig::default()).unwrap();
        let wide = refine_lighting(
            &route(),
            &set,
            &LightingConfig { buffer_m: 50.0, ..LightingConfig::default() },
        )
        .unwrap();
        assert_eq!(narrow.lamp_count, 1);
        assert_eq!(wide.lamp_count, 2);
    }

    // ── CSV loader ────────────────────────────────────────────────────────

    #[test]
    fn loads_named_columns_and_skips_bad_rows() {
        let csv = "id, LON ,lat\n1,127.0276,37.4979\n2,abc,37.5\n3,127.0281,37.4983\n4,,\n";
        let set = load_lamps_reader(Cursor::new(csv), "lon", "lat").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.points()[1], GeoPoint::new(37.4983, 127.0281));
    }

    #[test]
    fn out_of_range_rows_skipped() {
        let csv = "x,y\n200.0,37.5\n127.0,95.0\n127.0,37.5\n";
        let set = load_lamps_reader(Cursor::new(csv), "x", "y").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_column_is_error() {
        let csv = "lng,lat\n127.0,37.5\n";
        let r = load_lamps_reader(Cursor::new(csv), "lon", "lat");
        assert!(matches!(r, Err(ScoreError::MissingColumn(c)) if c == "lon"));
    }

    #[test]
    fn no_usable_rows_is_error() {
        let csv = "lon,lat\nfoo,bar\n";
        let r = load_lamps_reader(Cursor::new(csv), "lon", "lat");
        assert!(matches!(r, Err(ScoreError::NoLamps { skipped: 1 })));
    }
}
