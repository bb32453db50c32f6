//! Request-scoped deterministic RNG.
//!
//! # Determinism strategy
//!
//! Every recommendation request owns one `RequestRng`.  Nothing in the
//! workspace reaches for a global generator, so two concurrent requests never
//! share state and a request replayed with the same seed samples the same
//! waypoints.
//!
//! When a request fans out over several anchors, each anchor gets a child
//! seeded by:
//!
//!   seed = parent_draw XOR (offset * MIXING_CONSTANT)
//!
//! Children are derived sequentially before any parallel work starts, so the
//! result does not depend on thread scheduling.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Request-scoped RNG.
///
/// Implements [`RngCore`], so it can be handed to any API that takes
/// `&mut impl rand::Rng` (the loop generator does).
pub struct RequestRng(SmallRng);

impl RequestRng {
    /// Seed deterministically.  The same seed always produces the same
    /// candidate loops for the same network.
    pub fn new(seed: u64) -> Self {
        RequestRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy, for production requests that do not need to be
    /// replayed.
    pub fn from_entropy() -> Self {
        RequestRng(SmallRng::from_entropy())
    }

    /// `new(seed)` when a seed is configured, otherwise `from_entropy()`.
    pub fn seeded_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None    => Self::from_entropy(),
        }
    }

    /// Derive an independent child RNG, e.g. one per anchor point.
    pub fn child(&mut self, offset: u64) -> RequestRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        RequestRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Six lowercase hex digits, used as the random part of route ids.
    pub fn hex6(&mut self) -> String {
        format!("{:06x}", self.0.r#gen::<u32>() & 0x00ff_ffff)
    }
}

impl RngCore for RequestRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}
