//! Unit tests for lw-loop.

use lw_core::{GeoPoint, LoopConfig, NodeId, RequestRng};
use lw_spatial::{WalkNetwork, WalkNetworkBuilder};

use crate::{CandidateKind, LoopCandidateGenerator, LoopError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const GANGNAM: GeoPoint = GeoPoint { lat: 37.4979, lon: 127.0276 };

/// Square street grid of `(2·half + 1)²` nodes, `spacing_m` apart, centred
/// on `center`.  Returns the network and the node at `center`.
///
/// With `isolate_center` the center node keeps no edges.  With
/// `long_duplicates` every street also gets a 50 % longer parallel way,
/// inserted before the real one.
fn grid(
    center:          GeoPoint,
    half:            i32,
    spacing_m:       f64,
    isolate_center:  bool,
    long_duplicates: bool,
) -> (WalkNetwork, NodeId) {
    let side = (2 * half + 1) as usize;
    let mut b = WalkNetworkBuilder::new();
    let mut ids = Vec::with_capacity(side * side);
    for i in -half..=half {
        for j in -half..=half {
            ids.push(b.add_node(center.offset_m(i as f64 * spacing_m, j as f64 * spacing_m)));
        }
    }
    let at = |i: usize, j: usize| ids[i * side + j];
    let center_node = at(half as usize, half as usize);

    let link = |b: &mut WalkNetworkBuilder, a: NodeId, c: NodeId| {
        if isolate_center && (a == center_node || c == center_node) {
            return;
        }
        if long_duplicates {
            let len = b.node_pos(a).distance_m(b.node_pos(c));
            b.add_way(a, c, len * 1.5);
        }
        b.add_straight_way(a, c);
    };
    for i in 0..side {
        for j in 0..side {
            if i + 1 < side {
                link(&mut b, at(i, j), at(i + 1, j));
            }
            if j + 1 < side {
                link(&mut b, at(i, j), at(i, j + 1));
            }
        }
    }
    (b.build(), center_node)
}

/// `spokes` straight streets radiating from `center`, nodes every `step_m`
/// out to `length_m`.
fn star(center: GeoPoint, spokes: usize, step_m: f64, length_m: f64) -> (WalkNetwork, NodeId) {
    let mut b = WalkNetworkBuilder::new();
    let hub = b.add_node(center);
    let steps = (length_m / step_m) as usize;
    for s in 0..spokes {
        let theta = std::f64::consts::TAU * s as f64 / spokes as f64;
        let mut prev = hub;
        for k in 1..=steps {
            let n = b.add_node(center.on_ring(k as f64 * step_m, theta));
            b.add_straight_way(prev, n);
            prev = n;
        }
    }
    (b.build(), hub)
}

fn generator() -> LoopCandidateGenerator<lw_spatial::DijkstraRouter> {
    LoopCandidateGenerator::default()
}

/// 3 km target with a band wide enough that every stitched loop on the
/// test grid is accepted.
fn wide_config() -> LoopConfig {
    LoopConfig { tolerance: 0.9, ..LoopConfig::default() }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generation {
    use super::*;

    #[test]
    fn wide_band_fills_candidate_count() {
        let (net, _) = grid(GANGNAM, 10, 100.0, false, false);
        let mut rng = RequestRng::new(1);
        let (loops, stats) = generator()
            .generate_with_stats(&net, GANGNAM, &wide_config(), &mut rng)
            .unwrap();
        assert_eq!(loops.len(), 6);
        assert_eq!(stats.accepted, 6);
        assert_eq!(stats.trials, 6);
    }

    #[test]
    fn candidates_are_closed_and_follow_edges() {
        let (net, center_node) = grid(GANGNAM, 10, 100.0, false, false);
        let mut rng = RequestRng::new(2);
        let loops = generator().generate(&net, GANGNAM, &wide_config(), &mut rng).unwrap();
        assert!(!loops.is_empty());
        for c in &loops {
            assert!(c.is_closed());
            assert_eq!(c.start(), Some(center_node));
            assert_eq!(c.kind, CandidateKind::Loop);
            assert!((2..=3).contains(&c.waypoints.len()));
            for pair in c.nodes.windows(2) {
                assert!(net.has_edge(pair[0], pair[1]), "missing edge {:?}", pair);
            }
            assert!(c.is_consistent_with(&net));
            assert_eq!(c.geometry.len(), c.nodes.len());
        }
    }

    #[test]
    fn accepted_lengths_lie_in_band() {
        let (net, _) = grid(GANGNAM, 10, 100.0, false, false);
        let config = LoopConfig::default();
        let (low, high) = config.band_m();
        for seed in 0..5 {
            let mut rng = RequestRng::new(seed);
            let (loops, stats) = generator()
                .generate_with_stats(&net, GANGNAM, &config, &mut rng)
                .unwrap();
            for c in &loops {
                assert!(c.length_m >= low && c.length_m <= high, "{} m", c.length_m);
            }
            assert!(loops.len() <= config.candidate_count);
            assert!(stats.trials <= config.max_trials());
            assert_eq!(stats.trials, stats.accepted + stats.no_path + stats.out_of_band);
            assert_eq!(stats.accepted, loops.len());
        }
    }

    #[test]
    fn same_seed_same_candidates() {
        let (net, _) = grid(GANGNAM, 10, 100.0, false, false);
        let config = LoopConfig::default();
        let a = generator().generate(&net, GANGNAM, &config, &mut RequestRng::new(42)).unwrap();
        let b = generator().generate(&net, GANGNAM, &config, &mut RequestRng::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_ways_do_not_change_loops() {
        let (plain, _) = grid(GANGNAM, 10, 100.0, false, false);
        let (doubled, _) = grid(GANGNAM, 10, 100.0, false, true);
        let config = wide_config();
        let a = generator().generate(&plain, GANGNAM, &config, &mut RequestRng::new(9)).unwrap();
        let b = generator().generate(&doubled, GANGNAM, &config, &mut RequestRng::new(9)).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.nodes, y.nodes);
            assert!((x.length_m - y.length_m).abs() < 1e-9);
            assert!(y.is_consistent_with(&doubled));
        }
    }

    #[test]
    fn lon_lat_matches_geometry() {
        let (net, _) = grid(GANGNAM, 10, 100.0, false, false);
        let loops = generator()
            .generate(&net, GANGNAM, &wide_config(), &mut RequestRng::new(3))
            .unwrap();
        let c = &loops[0];
        let ll = c.lon_lat();
        assert_eq!(ll.len(), c.geometry.len());
        assert_eq!(ll[0], (c.geometry[0].lon, c.geometry[0].lat));
        assert!((c.length_km() * 1_000.0 - c.length_m).abs() < 1e-9);
    }
}

// ── Failure modes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod failures {
    use super::*;

    #[test]
    fn disconnected_center_exhausts_budget() {
        let (net, _) = grid(GANGNAM, 10, 100.0, true, false);
        let config = LoopConfig::default();
        let (loops, stats) = generator()
            .generate_with_stats(&net, GANGNAM, &config, &mut RequestRng::new(5))
            .unwrap();
        assert!(loops.is_empty());
        assert_eq!(stats.trials, 30);
        assert_eq!(stats.no_path, 30);
    }

    #[test]
    fn empty_network_is_fatal() {
        let net = WalkNetwork::empty();
        let r = generator().generate(&net, GANGNAM, &LoopConfig::default(), &mut RequestRng::new(0));
        assert!(matches!(r, Err(LoopError::CenterUnsnappable { .. })));
    }

    #[test]
    fn invalid_config_rejected() {
        let (net, _) = grid(GANGNAM, 2, 100.0, false, false);
        let config = LoopConfig { target_km: 0.0, ..LoopConfig::default() };
        let r = generator().generate(&net, GANGNAM, &config, &mut RequestRng::new(0));
        assert!(matches!(r, Err(LoopError::Config(_))));
    }

    #[test]
    fn oversized_candidate_count_rejected_before_allocating() {
        let (net, _) = grid(GANGNAM, 2, 100.0, false, false);
        let config = LoopConfig {
            candidate_count: usize::MAX,
            trial_multiplier: 1,
            ..LoopConfig::default()
        };
        let r = generator().generate(&net, GANGNAM, &config, &mut RequestRng::new(0));
        assert!(matches!(r, Err(LoopError::Config(_))));
    }

    #[test]
    fn largest_accepted_candidate_count_runs_its_budget() {
        let (net, _) = grid(GANGNAM, 10, 100.0, true, false);
        let config = LoopConfig {
            candidate_count: lw_core::MAX_CANDIDATE_COUNT,
            trial_multiplier: 1,
            ..LoopConfig::default()
        };
        let (loops, stats) = generator()
            .generate_with_stats(&net, GANGNAM, &config, &mut RequestRng::new(5))
            .unwrap();
        assert!(loops.is_empty());
        assert_eq!(stats.trials, lw_core::MAX_CANDIDATE_COUNT);
    }

    #[test]
    fn unreachable_band_yields_nothing() {
        // A 20 km target cannot be met inside a 1 km grid with 2–3 waypoints.
        let (net, _) = grid(GANGNAM, 5, 100.0, false, false);
        let config = LoopConfig::default().with_target_km(20.0);
        let (loops, stats) = generator()
            .generate_with_stats(&net, GANGNAM, &config, &mut RequestRng::new(8))
            .unwrap();
        assert!(loops.is_empty());
        assert_eq!(stats.out_of_band, config.max_trials());
    }
}

// ── Out-and-back fallback ─────────────────────────────────────────────────────

#[cfg(test)]
mod out_and_back {
    use super::*;

    const EQUATOR: GeoPoint = GeoPoint { lat: 0.0, lon: 10.0 };

    #[test]
    fn finds_route_on_radial_streets() {
        let (net, hub) = star(EQUATOR, 36, 25.0, 1_500.0);
        let config = LoopConfig::default().with_target_km(1.0);
        let c = generator()
            .generate_out_and_back(&net, EQUATOR, &config, &mut RequestRng::new(11))
            .unwrap()
            .expect("radial streets admit an out-and-back");
        assert_eq!(c.kind, CandidateKind::OutAndBack);
        assert_eq!(c.start(), Some(hub));
        assert_eq!(c.waypoints.len(), 1);
        assert!(config.accepts(c.length_m));
        assert!(c.is_consistent_with(&net));
    }

    #[test]
    fn isolated_start_gives_none() {
        let (net, _) = grid(GANGNAM, 10, 100.0, true, false);
        let r = generator()
            .generate_out_and_back(&net, GANGNAM, &LoopConfig::default(), &mut RequestRng::new(4))
            .unwrap();
        assert!(r.is_none());
    }
}
