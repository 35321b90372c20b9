//! Sampler implementations.
//!
//! Production requests use [`RandomSampler`], which draws from the thread-local
//! RNG and is never seeded. [`SeededSampler`] and [`FirstNSampler`] exist so
//! that tests and the CLI can make the final draw reproducible.

use crate::traits::Sampler;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

/// Uniform draw without replacement from the thread RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn select(&self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        index::sample(&mut rand::rng(), len, amount).into_vec()
    }
}

/// Uniform draw without replacement from a fixed seed.
///
/// Each call restarts from the seed, so the same `(len, amount)` always
/// selects the same indices.
#[derive(Debug, Clone, Copy)]
pub struct SeededSampler {
    seed: u64,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Sampler for SeededSampler {
    fn select(&self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut rng = StdRng::seed_from_u64(self.seed);
        index::sample(&mut rng, len, amount).into_vec()
    }
}

/// Always picks the leading candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNSampler;

impl Sampler for FirstNSampler {
    fn select(&self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}
