//! Loop candidate generator.

use std::f64::consts::TAU;

use rand::Rng;

use lw_core::{GeoPoint, LoopConfig, NodeId};
use lw_spatial::{DijkstraRouter, Router, SpatialError, WalkNetwork};

use crate::{CandidateKind, LoopError, LoopResult, RouteCandidate};

/// Bounds on the factor applied to the out-and-back search radius between
/// trials.
const RESCALE_MIN: f64 = 0.5;
const RESCALE_MAX: f64 = 2.0;

/// Counters from one generation run.
///
/// `trials == accepted + no_path + out_of_band` always holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub trials:      usize,
    pub accepted:    usize,
    /// Trials abandoned because some segment had no path.
    pub no_path:     usize,
    /// Trials whose loop length fell outside the tolerance band.
    pub out_of_band: usize,
}

/// Samples closed loops around a center point.
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`DijkstraRouter`]).  Swap it at
/// compile time for a different routing algorithm with no runtime overhead.
pub struct LoopCandidateGenerator<R: Router> {
    pub router: R,
}

impl Default for LoopCandidateGenerator<DijkstraRouter> {
    fn default() -> Self {
        Self::new(DijkstraRouter)
    }
}

impl<R: Router> LoopCandidateGenerator<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }

    /// Sample up to `config.candidate_count` loops around `center`.
    ///
    /// Returns an empty `Vec` when the trial budget runs out without an
    /// accepted loop.  Fails only if `config` is invalid or `center` cannot
    /// be snapped (empty network).
    pub fn generate(
        &self,
        network: &WalkNetwork,
        center:  GeoPoint,
        config:  &LoopConfig,
        rng:     &mut impl Rng,
    ) -> LoopResult<Vec<RouteCandidate>> {
        self.generate_with_stats(network, center, config, rng)
            .map(|(candidates, _)| candidates)
    }

    /// Like [`generate`](Self::generate), also returning trial counters.
    pub fn generate_with_stats(
        &self,
        network: &WalkNetwork,
        center:  GeoPoint,
        config:  &LoopConfig,
        rng:     &mut impl Rng,
    ) -> LoopResult<(Vec<RouteCandidate>, GenerationStats)> {
        config.validate()?;
        let start = snap_center(network, center)?;
        let radius_m = config.ring_radius_m();
        let (low, high) = config.band_m();

        let mut stats = GenerationStats::default();
        let mut candidates = Vec::with_capacity(config.candidate_count.min(config.max_trials()));

        while candidates.len() < config.candidate_count && stats.trials < config.max_trials() {
            stats.trials += 1;

            let k = rng.gen_range(config.min_waypoints..=config.max_waypoints);
            let mut stops = Vec::with_capacity(k + 2);
            stops.push(start);
            for _ in 0..k {
                let theta: f64 = rng.gen_range(0.0..TAU);
                stops.push(network.nearest_node(center.on_ring(radius_m, theta))?);
            }
            stops.push(start);

            let nodes = match self.stitch(network, &stops) {
                Ok(nodes) => nodes,
                Err(SpatialError::NoPath { from, to }) => {
                    log::debug!("trial {}: no path {from} → {to}", stats.trials);
                    stats.no_path += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let length_m = network.path_length_m(&nodes)?;
            if !config.accepts(length_m) {
                log::debug!(
                    "trial {}: {length_m:.0} m outside [{low:.0}, {high:.0}]",
                    stats.trials
                );
                stats.out_of_band += 1;
                continue;
            }

            stats.accepted += 1;
            candidates.push(RouteCandidate {
                geometry: network.geometry(&nodes),
                nodes,
                length_m,
                waypoints: stops[1..stops.len() - 1].to_vec(),
                kind: CandidateKind::Loop,
            });
        }

        log::info!(
            "generated {}/{} loops around {center} in {} trials ({} no path, {} out of band)",
            stats.accepted,
            config.candidate_count,
            stats.trials,
            stats.no_path,
            stats.out_of_band
        );
        Ok((candidates, stats))
    }

    /// Search for one out-and-back route: a shortest path to a turnaround
    /// node and the shortest path back.
    ///
    /// The turnaround is sampled at half the target distance.  After each
    /// rejected trial the search radius is rescaled by how far the last
    /// attempt missed the target.  Uses the same trial budget as
    /// [`generate`](Self::generate); `Ok(None)` when it runs out.
    pub fn generate_out_and_back(
        &self,
        network: &WalkNetwork,
        center:  GeoPoint,
        config:  &LoopConfig,
        rng:     &mut impl Rng,
    ) -> LoopResult<Option<RouteCandidate>> {
        config.validate()?;
        let start = snap_center(network, center)?;
        let target_m = config.target_m();
        let mut radius_m = target_m / 2.0;

        for trial in 1..=config.max_trials() {
            let theta: f64 = rng.gen_range(0.0..TAU);
            let turn = network.nearest_node(center.on_ring(radius_m, theta))?;
            if turn == start {
                radius_m *= RESCALE_MAX;
                continue;
            }

            let nodes = match self.stitch(network, &[start, turn, start]) {
                Ok(nodes) => nodes,
                Err(SpatialError::NoPath { .. }) => continue,
                Err(e) => return Err(e.into()),
            };
            let length_m = network.path_length_m(&nodes)?;

            if config.accepts(length_m) {
                log::info!("out-and-back fallback found {length_m:.0} m route after {trial} trials");
                return Ok(Some(RouteCandidate {
                    geometry: network.geometry(&nodes),
                    nodes,
                    length_m,
                    waypoints: vec![turn],
                    kind: CandidateKind::OutAndBack,
                }));
            }
            radius_m *= (target_m / length_m).clamp(RESCALE_MIN, RESCALE_MAX);
        }

        log::info!("out-and-back fallback found no route around {center}");
        Ok(None)
    }

    /// Concatenate shortest paths between consecutive `stops`.
    ///
    /// Repeated stops contribute nothing, so the result never holds the
    /// same node twice in a row.
    fn stitch(&self, network: &WalkNetwork, stops: &[NodeId]) -> Result<Vec<NodeId>, SpatialError> {
        let mut nodes = vec![stops[0]];
        for pair in stops.windows(2) {
            if pair[0] == pair[1] {
                continue;
            }
            let path = self.router.route(network, pair[0], pair[1])?;
            nodes.extend_from_slice(&path.nodes[1..]);
        }
        Ok(nodes)
    }
}

fn snap_center(network: &WalkNetwork, center: GeoPoint) -> LoopResult<NodeId> {
    network
        .nearest_node(center)
        .map_err(|source| LoopError::CenterUnsnappable { center, source })
}
