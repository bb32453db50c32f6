//! Fluent builder for constructing a [`Recommender`].

use std::sync::Arc;

use lw_core::RecommendConfig;
use lw_loop::LoopCandidateGenerator;
use lw_score::{FeatureEstimator, LampSet, ScoringEngine};
use lw_spatial::Router;

use crate::{LampStore, RecommendResult, Recommender};

/// Fluent builder for [`Recommender<R>`].
///
/// # Required inputs
///
/// - [`RecommendConfig`] — loop sampling, feature defaults, weights, …
/// - `R: Router` — the routing algorithm (e.g. [`lw_spatial::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                   |
/// |---------------------|-------------------------------------------|
/// | `.lamps(set)`       | No lamp data (default lighting estimates) |
/// | `.lamp_store(arc)`  | A fresh, empty `LampStore`                |
///
/// # Example
///
/// ```rust,ignore
/// let recommender = RecommenderBuilder::new(config, DijkstraRouter)
///     .lamps(lamps)
///     .build()?;
/// let rec = recommender.recommend(&network, &start, &request, &mut rng)?;
/// ```
pub struct RecommenderBuilder<R: Router> {
    config: RecommendConfig,
    router: R,
    lamps:  Option<Arc<LampStore>>,
}

impl<R: Router> RecommenderBuilder<R> {
    pub fn new(config: RecommendConfig, router: R) -> Self {
        Self { config, router, lamps: None }
    }

    /// Start with `lamps` loaded.
    pub fn lamps(mut self, lamps: LampSet) -> Self {
        self.lamps = Some(Arc::new(LampStore::with_lamps(lamps)));
        self
    }

    /// Share an existing lamp store, e.g. one a background task reloads.
    pub fn lamp_store(mut self, store: Arc<LampStore>) -> Self {
        self.lamps = Some(store);
        self
    }

    /// Validate the configuration and return a ready [`Recommender`].
    pub fn build(self) -> RecommendResult<Recommender<R>> {
        self.config.validate()?;
        Ok(Recommender {
            generator: LoopCandidateGenerator::new(self.router),
            estimator: FeatureEstimator::new(self.config.features.clone()),
            scorer:    ScoringEngine::new(self.config.weights.clone()),
            lamps:     self.lamps.unwrap_or_default(),
            config:    self.config,
        })
    }
}
