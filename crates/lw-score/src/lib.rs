//! `lw-score` — per-route features and beginner-suitability scoring.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`features`] | `RouteFeatures`, `FeatureEstimator`                         |
//! | [`lighting`] | `LampSet`, CSV lamp loader, `refine_lighting`               |
//! | [`scoring`]  | `ScoringEngine`                                             |
//! | [`badges`]   | `Badge`, `badges_from_features`                             |
//! | [`error`]    | `ScoreError`, `ScoreResult<T>`                              |
//!
//! Everything here is pure and deterministic: the same route, lamps and
//! configuration always produce the same features, score and badges.

pub mod badges;
pub mod error;
pub mod features;
pub mod lighting;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use badges::{Badge, badges_from_features};
pub use error::{ScoreError, ScoreResult};
pub use features::{FeatureEstimator, RouteFeatures};
pub use lighting::{LampSet, LightingEstimate, load_lamps_csv, load_lamps_reader, refine_lighting};
pub use scoring::ScoringEngine;
