//! Recommendation observer trait for progress reporting and data collection.

use lw_loop::{GenerationStats, RouteCandidate};

use crate::ScoredRoute;

/// Callbacks invoked by
/// [`Recommender::recommend_observed`][crate::Recommender::recommend_observed]
/// at key points of the pipeline.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: collecting score distributions
///
/// ```rust,ignore
/// struct Scores(Vec<f64>);
///
/// impl RecommendObserver for Scores {
///     fn on_route_scored(&mut self, route: &ScoredRoute) {
///         self.0.push(route.score);
///     }
/// }
/// ```
pub trait RecommendObserver {
    /// Called once loop sampling has finished.
    fn on_candidates_generated(&mut self, _stats: &GenerationStats) {}

    /// Called when sampling found nothing and the out-and-back fallback
    /// produced a route.
    fn on_fallback_used(&mut self, _candidate: &RouteCandidate) {}

    /// Called for every candidate after scoring, in generation order.
    fn on_route_scored(&mut self, _route: &ScoredRoute) {}

    /// Called with the final ranked routes, best first.
    fn on_ranked(&mut self, _routes: &[ScoredRoute]) {}
}

/// A [`RecommendObserver`] that does nothing.
pub struct NoopObserver;

impl RecommendObserver for NoopObserver {}
