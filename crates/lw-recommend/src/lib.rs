//! `lw-recommend` — the loop recommendation pipeline.
//!
//! # Per-request pipeline
//!
//! ```text
//! recommend(network, start, request, rng):
//!   ① Generate — sample closed loops around start (lw-loop); optionally
//!                fall back to an out-and-back route when none is found.
//!   ② Score    — per candidate: baseline features, lamp-based lighting if
//!                the lamp store holds data, beginner score, badges,
//!                route id and display name.
//!   ③ Rank     — stable sort by score, keep top_k.
//! ```
//!
//! Network fetching is not part of `recommend`: callers pass the network in,
//! typically obtained through [`service::fetch_network`] or a
//! [`NetworkCache`](lw_spatial::NetworkCache).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | `recommend_many` fans out start points on Rayon.           |
//! | `serde`    | Serde derives on config, features and badges.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lw_core::{Place, RecommendConfig, RequestRng, TimeOfDay};
//! use lw_recommend::{RecommenderBuilder, RouteRequest};
//! use lw_spatial::DijkstraRouter;
//!
//! let recommender = RecommenderBuilder::new(RecommendConfig::default(), DijkstraRouter)
//!     .build()?;
//! let request = RouteRequest::new().with_target_km(3.0).at(TimeOfDay::Night);
//! let rec = recommender.recommend(&network, &start, &request, &mut RequestRng::new(42))?;
//! ```

pub mod builder;
pub mod error;
pub mod lamps;
pub mod observer;
pub mod recommender;
pub mod scored;
pub mod service;


pub use builder::RecommenderBuilder;
pub use error::{RecommendError, RecommendResult};
pub use lamps::LampStore;
pub use observer::{NoopObserver, RecommendObserver};
pub use recommender::{Recommendation, Recommender, RouteRequest};
pub use scored::{ScoredRoute, select_top_k};
