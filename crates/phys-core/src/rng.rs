//! Deterministic simulation RNG wrapper.
//!
//! # Determinism strategy
//!
//! One `SmallRng` per engine, seeded from `SimConfig::seed`.  Every random
//! draw the engine makes (initial positions, initial headings, the per-step
//! tie-break sign, reset redraws) comes from this single stream in a fixed
//! order, so two engines built from the same seed and driven by the same
//! calls stay bit-identical.
//!
//! Per-agent kernels never draw: the parallel feature therefore cannot change
//! results.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.  Used only from the engine's own thread.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform `f64` in `[0, max)`.  `max` must be positive.
    #[inline]
    pub fn uniform(&mut self, max: f64) -> f64 {
        self.0.gen_range(0.0..max)
    }

    /// `+1.0` or `-1.0` with equal probability.
    #[inline]
    pub fn sign(&mut self) -> f64 {
        if self.0.gen_bool(0.5) { 1.0 } else { -1.0 }
    }
}
