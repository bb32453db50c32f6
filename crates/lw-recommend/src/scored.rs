//! Scored routes and top-K selection.

use lw_core::Place;
use lw_loop::RouteCandidate;
use lw_score::{Badge, RouteFeatures};

/// A candidate with its features, score and presentation fields.
///
/// Built once by the recommender and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    /// `loop_{index}_{6 hex digits}`; unique within a recommendation.
    pub route_id:  String,
    /// `"{start label} loop #{n}"`, numbered in generation order from 1.
    pub name:      String,
    pub start:     Place,
    pub candidate: RouteCandidate,
    pub features:  RouteFeatures,
    /// Beginner score in `[0, 100]`.
    pub score:     f64,
    pub badges:    Vec<Badge>,
}

/// Keep the `k` highest-scoring routes, best first.
///
/// The sort is stable: routes with equal scores stay in generation order.
pub fn select_top_k(mut routes: Vec<ScoredRoute>, k: usize) -> Vec<ScoredRoute> {
    routes.sort_by(|a, b| b.score.total_cmp(&a.score));
    routes.truncate(k);
    routes
}
