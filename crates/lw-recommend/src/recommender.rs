//! The `Recommender` and its per-request pipeline.

use std::sync::Arc;

use lw_core::{FallbackPolicy, LoopConfig, Place, RecommendConfig, RequestRng, TimeOfDay};
use lw_loop::{GenerationStats, LoopCandidateGenerator, RouteCandidate};
use lw_score::{
    FeatureEstimator, LampSet, ScoringEngine, badges_from_features, refine_lighting,
};
use lw_spatial::{Router, WalkNetwork};

use crate::{LampStore, NoopObserver, RecommendObserver, RecommendResult, ScoredRoute, select_top_k};

// ── Request / response ────────────────────────────────────────────────────────

/// What the user asked for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteRequest {
    /// Desired loop length.  `None` uses the configured default.
    pub target_km: Option<f64>,
    pub time:      TimeOfDay,
}

impl RouteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_km(mut self, km: f64) -> Self {
        self.target_km = Some(km);
        self
    }

    pub fn at(mut self, time: TimeOfDay) -> Self {
        self.time = time;
        self
    }
}

/// Ranked routes for one start point.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    /// Best first; at most `top_k`.  Empty when no candidate was found.
    pub routes: Vec<ScoredRoute>,
    pub stats: GenerationStats,
    /// Target distance the routes were generated and scored against.
    pub target_km: f64,
    /// `true` if `routes` came from the out-and-back fallback.
    pub used_fallback: bool,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn best(&self) -> Option<&ScoredRoute> {
        self.routes.first()
    }
}

// ── Recommender ───────────────────────────────────────────────────────────────

/// Generates, scores and ranks loop routes.
///
/// Stateless between requests apart from the shared [`LampStore`]; one
/// instance can serve many requests concurrently.
///
/// Create via [`RecommenderBuilder`][crate::RecommenderBuilder].
pub struct Recommender<R: Router> {
    pub(crate) config:    RecommendConfig,
    pub(crate) generator: LoopCandidateGenerator<R>,
    pub(crate) estimator: FeatureEstimator,
    pub(crate) scorer:    ScoringEngine,
    pub(crate) lamps:     Arc<LampStore>,
}

impl<R: Router> Recommender<R> {
    /// Configuration the recommender was built with.  Fixed for its
    /// lifetime; build a new recommender to change it.
    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// The lamp store consulted by every request.  Swap its contents to
    /// update lamp data without rebuilding the recommender.
    pub fn lamp_store(&self) -> &Arc<LampStore> {
        &self.lamps
    }

    /// Loop parameters in effect for `request`.
    pub fn loop_config(&self, request: &RouteRequest) -> LoopConfig {
        match request.target_km {
            Some(km) => self.config.loops.with_target_km(km),
            None => self.config.loops.clone(),
        }
    }

    /// Recommend up to `top_k` routes starting near `start`.
    ///
    /// An empty [`Recommendation`] is a normal outcome (nothing within
    /// tolerance).  Errors are limited to invalid parameters and a network
    /// the start cannot be snapped to.
    pub fn recommend(
        &self,
        network: &WalkNetwork,
        start:   &Place,
        request: &RouteRequest,
        rng:     &mut RequestRng,
    ) -> RecommendResult<Recommendation> {
        self.recommend_observed(network, start, request, rng, &mut NoopObserver)
    }

    /// Like [`recommend`](Self::recommend), reporting progress to `observer`.
    pub fn recommend_observed<O: RecommendObserver>(
        &self,
        network:  &WalkNetwork,
        start:    &Place,
        request:  &RouteRequest,
        rng:      &mut RequestRng,
        observer: &mut O,
    ) -> RecommendResult<Recommendation> {
        let loops = self.loop_config(request);
        let target_km = loops.target_km;

        // ── ① Generate ───────────────────────────────────────────────────
        let (mut candidates, stats) =
            self.generator.generate_with_stats(network, start.point, &loops, rng)?;
        observer.on_candidates_generated(&stats);

        let mut used_fallback = false;
        if candidates.is_empty() && self.config.fallback == FallbackPolicy::OutAndBack {
            if let Some(c) = self.generator.generate_out_and_back(network, start.point, &loops, rng)? {
                observer.on_fallback_used(&c);
                candidates.push(c);
                used_fallback = true;
            }
        }

        if candidates.is_empty() {
            log::info!("no route within tolerance of {target_km} km near {}", start.label());
            return Ok(Recommendation { routes: Vec::new(), stats, target_km, used_fallback });
        }

        // ── ② Score ──────────────────────────────────────────────────────
        let lamps = self.lamps.snapshot();
        let scored: Vec<ScoredRoute> = candidates
            .into_iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let route = self.score_candidate(
                    idx, candidate, start, target_km, request.time, lamps.as_deref(), rng,
                );
                observer.on_route_scored(&route);
                route
            })
            .collect();

        // ── ③ Rank ───────────────────────────────────────────────────────
        let routes = select_top_k(scored, self.config.top_k);
        observer.on_ranked(&routes);
        log::info!(
            "ranked {} routes near {} (best {:.1})",
            routes.len(),
            start.label(),
            routes.first().map_or(0.0, |r| r.score)
        );

        Ok(Recommendation { routes, stats, target_km, used_fallback })
    }

    /// Recommend for several start points at once.
    ///
    /// Each start gets a child of `rng`, derived in input order before any
    /// work begins, so results match between the sequential and `parallel`
    /// builds.  One failing start does not affect the others.
    pub fn recommend_many(
        &self,
        network: &WalkNetwork,
        starts:  &[Place],
        request: &RouteRequest,
        rng:     &mut RequestRng,
    ) -> Vec<RecommendResult<Recommendation>> {
        let children: Vec<RequestRng> =
            (0..starts.len()).map(|i| rng.child(i as u64)).collect();

        #[cfg(not(feature = "parallel"))]
        {
            starts
                .iter()
                .zip(children)
                .map(|(start, mut child)| self.recommend(network, start, request, &mut child))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            starts
                .par_iter()
                .zip(children.into_par_iter())
                .map(|(start, mut child)| self.recommend(network, start, request, &mut child))
                .collect()
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn score_candidate(
        &self,
        idx:       usize,
        candidate: RouteCandidate,
        start:     &Place,
        target_km: f64,
        time:      TimeOfDay,
        lamps:     Option<&LampSet>,
        rng:       &mut RequestRng,
    ) -> ScoredRoute {
        let mut features = self.estimator.estimate(candidate.length_m, time);
        if let Some(lamps) = lamps {
            if let Some(est) = refine_lighting(&candidate.geometry, lamps, &self.config.lighting) {
                features = features.with_lighting(&est);
            }
        }

        let score = self.scorer.score(&features, target_km, time);
        let badges = badges_from_features(&features, &self.config.badges);

        ScoredRoute {
            route_id: format!("loop_{idx}_{}", rng.hex6()),
            name: format!("{} loop #{}", start.label(), idx + 1),
            start: start.clone(),
            candidate,
            features,
            score,
            badges,
        }
    }
}
