//! `lw-core` — foundational types for the `loopwalk` route recommender.
//!
//! This crate is a dependency of every other `lw-*` crate.  It intentionally
//! has no `lw-*` dependencies and minimal external ones (`rand`,
//! `rustc-hash`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `GeoPoint`, `Place`, haversine, flat-earth offsets    |
//! | [`dedup`]       | `Located`, `dedup_points`                             |
//! | [`config`]      | `LoopConfig`, `ScoringWeights`, `RecommendConfig`, …  |
//! | [`daypart`]     | `TimeOfDay` enum                                      |
//! | [`rng`]         | `RequestRng` (request-scoped, seedable)               |
//! | [`error`]       | `LwError`, `LwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for JSON config files and route responses.        |

pub mod config;
pub mod daypart;
pub mod dedup;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BadgeRules, FallbackPolicy, FeatureDefaults, LightingConfig, LoopConfig, MAX_CANDIDATE_COUNT,
    MAX_TRIAL_MULTIPLIER, RecommendConfig, ScoringWeights,
};
pub use daypart::TimeOfDay;
pub use dedup::{Located, dedup_points};
pub use error::{LwError, LwResult};
pub use geo::{GeoPoint, METERS_PER_DEGREE, Place};
pub use ids::{EdgeId, NodeId};
pub use rng::RequestRng;
