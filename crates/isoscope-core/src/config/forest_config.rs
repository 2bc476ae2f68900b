//! Isolation forest configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONTAMINATION, DEFAULT_ENSEMBLE_SIZE, DEFAULT_MAX_SUBSAMPLE_SIZE, DEFAULT_THREADS,
};

/// Configuration for fitting and classifying.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble. Default: 100.
    pub ensemble_size: Option<usize>,
    /// Observations drawn per tree. Default: min(256, n).
    pub subsample_size: Option<usize>,
    /// Expected anomaly proportion in (0, 0.5]. Default: 0.1.
    pub contamination: Option<f64>,
    /// Base random seed. Unset means a fresh seed per fit.
    pub seed: Option<u64>,
    /// Worker threads for fit and score. Default: 0 (global pool).
    pub threads: Option<usize>,
}

impl ForestConfig {
    /// Returns the effective ensemble size, defaulting to 100.
    pub fn effective_ensemble_size(&self) -> usize {
        self.ensemble_size.unwrap_or(DEFAULT_ENSEMBLE_SIZE)
    }

    /// Returns the effective subsample size for a dataset of `n` observations.
    /// Defaults to min(256, n).
    pub fn effective_subsample_size(&self, n: usize) -> usize {
        self.subsample_size
            .unwrap_or_else(|| DEFAULT_MAX_SUBSAMPLE_SIZE.min(n))
    }

    /// Returns the effective contamination, defaulting to 0.1.
    pub fn effective_contamination(&self) -> f64 {
        self.contamination.unwrap_or(DEFAULT_CONTAMINATION)
    }

    /// Returns the effective thread count, defaulting to 0.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }
}
