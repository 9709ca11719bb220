//! Deterministic run-level RNG wrapper.
//!
//! One `SimRng` per run, seeded from the run configuration and threaded
//! explicitly through the domain world.  Never a global or thread-local
//! source: reproducing a run must require exactly one seed, and parallel
//! test runs must not contaminate each other.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Run-level deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
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

    /// Draw from any `rand`-compatible distribution (e.g. `rand_distr::Exp`).
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, distribution: &D) -> T {
        self.0.sample(distribution)
    }
}
