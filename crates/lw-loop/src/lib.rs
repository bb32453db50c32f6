//! `lw-loop` — randomized loop candidate generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`candidate`] | `RouteCandidate`, `CandidateKind`                              |
//! | [`generator`] | `LoopCandidateGenerator<R>`, `GenerationStats`                 |
//! | [`error`]     | `LoopError`, `LoopResult<T>`                                   |
//!
//! # Sampling model
//!
//! A loop of length `L` is approximated as a circle of circumference `L`
//! around the start, so waypoints are drawn on a ring of radius `L / 2π`:
//!
//! 1. Snap the center to its nearest node (`start`).  Failure here is the
//!    only fatal error.
//! 2. Per trial draw `k` waypoints at random bearings on the ring and snap
//!    each to a node.
//! 3. Stitch shortest paths `start → wp₁ → … → wpₖ → start`.  A segment with
//!    no path abandons the trial.
//! 4. Keep the loop if its length falls in the tolerance band.
//!
//! Sampling stops at `candidate_count` loops or after
//! `candidate_count × trial_multiplier` trials, whichever comes first.
//! All randomness comes from the caller's RNG, so a seeded request is
//! reproducible.

pub mod candidate;
pub mod error;
pub mod generator;

#[cfg(test)]
mod tests;

pub use candidate::{CandidateKind, RouteCandidate};
pub use error::{LoopError, LoopResult};
pub use generator::{GenerationStats, LoopCandidateGenerator};
