//! Seedable randomness for order generation.
//!
//! The only stochastic input to the orchestrator is the randomized
//! requested-product list a truck receives when it is (re-)admitted.  A
//! single `SmallRng` behind a thin wrapper keeps runs reproducible under a
//! fixed seed, which the scenario tests rely on.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.  Owned by the scheduler loop; never shared.
pub struct SimRng(SmallRng);

impl SimRng {
    /// Deterministic RNG from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// OS-entropy RNG for normal daemon runs.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
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

    /// Choose a random element from a slice; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
