//! End-to-end detection: fit → score → normalize → classify.

use isoscope_core::config::ForestConfig;
use isoscope_core::constants::{DEFAULT_CONTAMINATION, DEFAULT_ENSEMBLE_SIZE, DEFAULT_THREADS};
use isoscope_core::errors::ForestError;
use isoscope_core::tracing::metrics;
use isoscope_core::traits::{Cancellable, CancellationToken};

use super::classifier::AnomalyClassifier;
use super::ensemble::IsolationForest;
use super::sampler::default_subsample_size;
use super::types::{AnomalyResult, Dataset, ScoreTable};

/// Score of an observation that is neither shorter nor longer to isolate
/// than average.
const NEUTRAL_SCORE: f64 = 0.5;

/// Parameters for one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    /// Trees in the ensemble (default: 100).
    pub ensemble_size: usize,
    /// Observations per tree; `None` means min(256, n).
    pub subsample_size: Option<usize>,
    /// Expected anomaly proportion in (0, 0.5] (default: 0.1).
    pub contamination: f64,
    /// Base seed; `None` means a fresh seed per run.
    pub seed: Option<u64>,
    /// Dedicated worker threads; 0 runs on the global rayon pool.
    pub threads: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
            subsample_size: None,
            contamination: DEFAULT_CONTAMINATION,
            seed: None,
            threads: DEFAULT_THREADS,
        }
    }
}

impl From<&ForestConfig> for ForestParams {
    fn from(config: &ForestConfig) -> Self {
        Self {
            ensemble_size: config.effective_ensemble_size(),
            subsample_size: config.subsample_size,
            contamination: config.effective_contamination(),
            seed: config.seed,
            threads: config.effective_threads(),
        }
    }
}

/// Scores and flagged indices from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub scores: ScoreTable,
    pub result: AnomalyResult,
    /// Base seed actually used, for replaying unseeded runs.
    pub seed: u64,
}

/// Runs the full detection chain with fixed parameters.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    params: ForestParams,
}

impl AnomalyDetector {
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &ForestConfig) -> Self {
        Self::new(ForestParams::from(config))
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn detect(&self, dataset: &Dataset) -> Result<Detection, ForestError> {
        self.detect_cancellable(dataset, &CancellationToken::new())
    }

    /// `detect` that can be cancelled between trees or observations.
    pub fn detect_cancellable<C: Cancellable + Sync>(
        &self,
        dataset: &Dataset,
        cancel: &C,
    ) -> Result<Detection, ForestError> {
        // Cheap parameter checks before any tree is built.
        let classifier = AnomalyClassifier::new(self.params.contamination)?;
        let subsample_size = self
            .params
            .subsample_size
            .unwrap_or_else(|| default_subsample_size(dataset.len()));
        if self.params.ensemble_size < 1 {
            return Err(ForestError::invalid_parameter(
                "ensemble_size",
                "must be at least 1",
            ));
        }
        if dataset.len() == 1 && subsample_size == 1 {
            return Ok(lone_observation(self.params.seed));
        }
        if subsample_size < 2 {
            return Err(ForestError::invalid_parameter(
                "subsample_size",
                format!(
                    "at least 2 observations per tree are needed to normalize scores, got {subsample_size}"
                ),
            ));
        }

        let run = || -> Result<Detection, ForestError> {
            let forest = IsolationForest::fit_cancellable(
                dataset,
                self.params.ensemble_size,
                subsample_size,
                self.params.seed,
                cancel,
            )?;
            let scores = forest.score_cancellable(dataset, cancel)?;
            let result = classifier.classify(&scores)?;
            Ok(Detection {
                scores,
                result,
                seed: forest.seed(),
            })
        };

        let detection = if self.params.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.params.threads)
                .build()
                .map_err(|e| ForestError::invalid_parameter("threads", e.to_string()))?;
            pool.install(run)?
        } else {
            run()?
        };

        let span = tracing::info_span!(
            "detect",
            flagged_count = tracing::field::Empty,
            threshold = tracing::field::Empty,
        );
        span.record(metrics::FLAGGED_COUNT, detection.result.len() as u64);
        if let Some(threshold) = detection.result.threshold {
            span.record(metrics::THRESHOLD, threshold);
        }
        span.in_scope(|| {
            tracing::info!(
                observations = dataset.len(),
                flagged = detection.result.len(),
                target = detection.result.target_count,
                "anomaly detection complete"
            );
        });

        Ok(detection)
    }
}

/// A single observation has nothing to be isolated from: it scores
/// neutral and is never flagged.
fn lone_observation(seed: Option<u64>) -> Detection {
    tracing::debug!("single observation, nothing to isolate");
    Detection {
        scores: ScoreTable::from_normalized(vec![NEUTRAL_SCORE]),
        result: AnomalyResult {
            indices: Vec::new(),
            threshold: None,
            target_count: 0,
        },
        seed: seed.unwrap_or_else(rand::random),
    }
}

/// Fit a forest on `observations` and return the flagged indices.
///
/// `subsample_size: None` uses min(256, n); `seed: None` is non-deterministic.
/// A single observation is never flagged.
pub fn fit_and_score(
    observations: &[Vec<f64>],
    ensemble_size: usize,
    subsample_size: Option<usize>,
    contamination: f64,
    seed: Option<u64>,
) -> Result<AnomalyResult, ForestError> {
    let dataset = Dataset::new(observations.to_vec())?;
    let detector = AnomalyDetector::new(ForestParams {
        ensemble_size,
        subsample_size,
        contamination,
        seed,
        threads: DEFAULT_THREADS,
    });
    Ok(detector.detect(&dataset)?.result)
}
