//! Deterministic per-bee and world-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each bee gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (bee_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive bee IDs uniformly across the seed space.
//! This means:
//!
//! - Bees never share RNG state, so a bee's stochastic life history does not
//!   depend on which other bees happen to act before it in a step.
//! - Hive births append new bees at the end of the store without disturbing
//!   the seeds (and therefore the draws) of existing bees — runs stay
//!   reproducible even as the population grows.
//!
//! The world itself owns a single `SimRng` for global draws: the per-phase
//! activation shuffles, weather transitions, and patch placement.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BeeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-bee deterministic RNG.
///
/// Create one per bee at birth; store in a `Vec<AgentRng>` parallel to the
/// other SoA columns of the bee store.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a bee ID.
    pub fn new(global_seed: u64, bee: BeeId) -> Self {
        let seed = global_seed ^ (bee.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
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

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A heading angle uniform in `[0, 2π)` radians.
    #[inline]
    pub fn gen_angle(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }

    /// Sample a Gaussian with the given mean and standard deviation, clipped
    /// from below at `floor`.
    ///
    /// Box-Muller transform over two uniform draws — used once per bee at
    /// birth (scent-bias trait), so no table-based sampler is warranted.
    pub fn gen_clipped_gaussian(&mut self, mean: f32, sd: f32, floor: f32) -> f32 {
        let u1: f64 = self.0.gen_range(f64::EPSILON..1.0);
        let u2: f64 = self.0.gen_range(0.0..1.0);
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        (mean + sd * z as f32).max(floor)
    }

    /// Choose a random element from a non-empty slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// World-level RNG for global operations: per-phase activation shuffles,
/// weather transitions, and initial patch placement.
///
/// Only the scheduler touches this, always single-threaded, so the draw
/// sequence is fully determined by the seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to give
    /// placement and scheduling independent streams from the one root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    ///
    /// The scheduler shuffles each phase's ID list with this every step to
    /// avoid systematic activation-order bias.
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
