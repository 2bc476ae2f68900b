//! Per-tree subsampling without replacement.

use isoscope_core::constants::DEFAULT_MAX_SUBSAMPLE_SIZE;
use isoscope_core::errors::ForestError;
use rand::seq::index;
use rand::Rng;

/// Default subsample size for `n` observations: `min(256, n)`.
pub fn default_subsample_size(n: usize) -> usize {
    DEFAULT_MAX_SUBSAMPLE_SIZE.min(n)
}

/// Draws `subsample_size` distinct observation indices uniformly at random.
///
/// Pure given the random source: the caller owns the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    subsample_size: usize,
}

impl Sampler {
    pub fn new(subsample_size: usize) -> Result<Self, ForestError> {
        if subsample_size < 1 {
            return Err(ForestError::invalid_parameter(
                "subsample_size",
                "must be at least 1",
            ));
        }
        Ok(Self { subsample_size })
    }

    pub fn subsample_size(&self) -> usize {
        self.subsample_size
    }

    /// Fails unless `1 <= subsample_size <= population`.
    pub fn check(&self, population: usize) -> Result<(), ForestError> {
        if self.subsample_size > population {
            return Err(ForestError::invalid_parameter(
                "subsample_size",
                format!(
                    "{} exceeds dataset size {population}",
                    self.subsample_size
                ),
            ));
        }
        Ok(())
    }

    /// Draw indices from `0..population`.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        population: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>, ForestError> {
        self.check(population)?;
        Ok(index::sample(rng, population, self.subsample_size).into_vec())
    }
}
