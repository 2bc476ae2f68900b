//! Contamination-based thresholding.
//!
//! The target count is `k = max(floor(contamination * n), 1)`. The
//! threshold is the k-th highest score and every score at or above it is
//! flagged, so ties at the threshold are all included and the flagged
//! count can exceed `k`. A non-empty table always flags its top score.

use isoscope_core::constants::MAX_CONTAMINATION;
use isoscope_core::errors::ForestError;

use super::types::{AnomalyResult, ScoreTable};

/// Absorbs products like `0.29 * 100 = 28.999999999999996`.
const RANK_EPSILON: f64 = 1e-9;

/// Flags the most anomalous `contamination` share of a score table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyClassifier {
    contamination: f64,
}

impl AnomalyClassifier {
    /// Fails unless `contamination` is in (0, 0.5].
    pub fn new(contamination: f64) -> Result<Self, ForestError> {
        if !(contamination > 0.0 && contamination <= MAX_CONTAMINATION) {
            return Err(ForestError::invalid_parameter(
                "contamination",
                format!("must be in (0, {MAX_CONTAMINATION}], got {contamination}"),
            ));
        }
        Ok(Self { contamination })
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    /// `floor(contamination * n)`, raised to 1 for any non-empty table.
    pub fn target_count(&self, n: usize) -> usize {
        let k = (self.contamination * n as f64 + RANK_EPSILON).floor() as usize;
        if n == 0 {
            0
        } else {
            k.max(1)
        }
    }

    pub fn classify(&self, scores: &ScoreTable) -> Result<AnomalyResult, ForestError> {
        if scores.is_empty() {
            return Err(ForestError::invalid_parameter(
                "scores",
                "cannot classify an empty score table",
            ));
        }

        let target_count = self.target_count(scores.len());
        let mut ranked = scores.as_slice().to_vec();
        ranked.sort_unstable_by(|a, b| b.total_cmp(a));
        let threshold = ranked[target_count - 1];

        let indices: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, score)| score >= threshold)
            .map(|(index, _)| index)
            .collect();

        tracing::debug!(
            threshold,
            target_count,
            flagged_count = indices.len(),
            "classified observations"
        );

        Ok(AnomalyResult {
            indices,
            threshold: Some(threshold),
            target_count,
        })
    }
}

/// One-shot form of [`AnomalyClassifier::classify`].
pub fn classify(scores: &ScoreTable, contamination: f64) -> Result<AnomalyResult, ForestError> {
    AnomalyClassifier::new(contamination)?.classify(scores)
}
