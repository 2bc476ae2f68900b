//! Isolation forest ensemble: parallel fit and scoring.
//!
//! Each tree draws from its own `ChaCha8Rng` seeded with `seed + i`, so
//! the fitted model depends only on the seed, never on thread scheduling.

use std::time::Instant;

use isoscope_core::errors::ForestError;
use isoscope_core::tracing::metrics;
use isoscope_core::traits::{Cancellable, CancellationToken};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::normalizer::ScoreNormalizer;
use super::path_length::height_limit;
use super::sampler::Sampler;
use super::tree::IsolationTree;
use super::types::{Dataset, ScoreTable};

/// A fitted ensemble of isolation trees. Read-only after `fit`.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    subsample_size: usize,
    dimensions: usize,
    seed: u64,
}

impl IsolationForest {
    /// Build `ensemble_size` trees, each over its own subsample.
    ///
    /// `seed: None` draws a base seed from OS entropy; the seed used is
    /// available from `seed()` so the run can be replayed.
    pub fn fit(
        dataset: &Dataset,
        ensemble_size: usize,
        subsample_size: usize,
        seed: Option<u64>,
    ) -> Result<Self, ForestError> {
        Self::fit_cancellable(
            dataset,
            ensemble_size,
            subsample_size,
            seed,
            &CancellationToken::new(),
        )
    }

    /// `fit` that gives up between trees once `cancel` fires.
    pub fn fit_cancellable<C: Cancellable + Sync>(
        dataset: &Dataset,
        ensemble_size: usize,
        subsample_size: usize,
        seed: Option<u64>,
        cancel: &C,
    ) -> Result<Self, ForestError> {
        if ensemble_size < 1 {
            return Err(ForestError::invalid_parameter(
                "ensemble_size",
                "must be at least 1",
            ));
        }
        if dataset.is_empty() {
            return Err(ForestError::invalid_parameter(
                "dataset",
                "must contain at least one observation",
            ));
        }
        let sampler = Sampler::new(subsample_size)?;
        sampler.check(dataset.len())?;

        let base_seed = seed.unwrap_or_else(rand::random);
        let height_limit = height_limit(subsample_size);

        let span = tracing::info_span!(
            "forest_fit",
            tree_count = ensemble_size,
            subsample_size,
            height_limit,
            observation_count = dataset.len(),
            seed = tracing::field::Empty,
            fit_time_ms = tracing::field::Empty,
        );
        let _guard = span.enter();
        span.record(metrics::SEED, base_seed);
        let start = Instant::now();

        let trees = (0..ensemble_size)
            .into_par_iter()
            .map(|i| {
                if cancel.is_cancelled() {
                    return Err(ForestError::Cancelled);
                }
                let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let sample = sampler.draw(dataset.len(), &mut rng)?;
                IsolationTree::build(dataset, sample, height_limit, &mut rng)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        span.record(metrics::FIT_TIME_MS, elapsed_ms);
        tracing::info!(
            trees = trees.len(),
            subsample_size,
            height_limit,
            elapsed_ms,
            "isolation forest fitted"
        );
        tracing::debug!(seed = base_seed, "forest seed");

        Ok(Self {
            trees,
            subsample_size,
            dimensions: dataset.dimensions(),
            seed: base_seed,
        })
    }

    /// Mean path length of `observation` across all trees.
    pub fn score_path_length(&self, observation: &[f64]) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.path_length(observation))
            .sum();
        total / self.trees.len() as f64
    }

    /// Anomaly score for every observation in `dataset`.
    pub fn score(&self, dataset: &Dataset) -> Result<ScoreTable, ForestError> {
        self.score_cancellable(dataset, &CancellationToken::new())
    }

    /// `score` that gives up between observations once `cancel` fires.
    pub fn score_cancellable<C: Cancellable + Sync>(
        &self,
        dataset: &Dataset,
        cancel: &C,
    ) -> Result<ScoreTable, ForestError> {
        if dataset.dimensions() != self.dimensions {
            return Err(ForestError::invalid_parameter(
                "dataset",
                format!(
                    "observations have {} dimensions, forest was fitted on {}",
                    dataset.dimensions(),
                    self.dimensions
                ),
            ));
        }
        let normalizer = ScoreNormalizer::new(self.subsample_size)?;

        let span = tracing::debug_span!(
            "forest_score",
            observation_count = dataset.len(),
            score_time_ms = tracing::field::Empty,
        );
        let _guard = span.enter();
        let start = Instant::now();

        let scores = (0..dataset.len())
            .into_par_iter()
            .map(|i| {
                if cancel.is_cancelled() {
                    return Err(ForestError::Cancelled);
                }
                Ok(normalizer.normalize(self.score_path_length(dataset.observation(i))))
            })
            .collect::<Result<Vec<_>, _>>()?;

        span.record(metrics::SCORE_TIME_MS, start.elapsed().as_millis() as u64);
        Ok(ScoreTable::from_normalized(scores))
    }

    pub fn trees(&self) -> &[IsolationTree] {
        &self.trees
    }

    pub fn ensemble_size(&self) -> usize {
        self.trees.len()
    }

    pub fn subsample_size(&self) -> usize {
        self.subsample_size
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Base seed the per-tree streams were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
