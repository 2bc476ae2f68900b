//! Core types for isolation-based anomaly detection.

use std::fmt;

use isoscope_core::errors::ForestError;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

/// An ordered, non-empty set of fixed-dimension observations.
///
/// Stored row-major; the row index is the identity reported in results.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
    dimensions: usize,
}

impl Dataset {
    /// Build a dataset from rows. Every row must have the same non-zero
    /// length and only finite values.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ForestError> {
        let dimensions = match rows.first() {
            Some(first) => first.len(),
            None => {
                return Err(ForestError::invalid_parameter(
                    "dataset",
                    "must contain at least one observation",
                ))
            }
        };
        if dimensions == 0 {
            return Err(ForestError::invalid_parameter(
                "dataset",
                "observations must have at least one dimension",
            ));
        }

        let mut values = Vec::with_capacity(rows.len() * dimensions);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != dimensions {
                return Err(ForestError::invalid_parameter(
                    "dataset",
                    format!(
                        "observation {index} has {} dimensions, expected {dimensions}",
                        row.len()
                    ),
                ));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(ForestError::invalid_parameter(
                    "dataset",
                    format!("observation {index} contains non-finite value {bad}"),
                ));
            }
            values.extend(row);
        }

        Ok(Self { values, dimensions })
    }

    /// Reshape a flat list of scalars into one-dimensional observations.
    pub fn from_scalars(values: &[f64]) -> Result<Self, ForestError> {
        Self::new(values.iter().map(|&v| vec![v]).collect())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len() / self.dimensions
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dimensionality shared by every observation.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The observation at `index`.
    ///
    /// Panics if `index >= len()`.
    pub fn observation(&self, index: usize) -> &[f64] {
        let start = index * self.dimensions;
        &self.values[start..start + self.dimensions]
    }

    /// Iterate observations in index order.
    pub fn observations(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dimensions)
    }

    /// Coordinate `dimension` of observation `index`.
    #[inline]
    pub(crate) fn value(&self, index: usize, dimension: usize) -> f64 {
        self.values[index * self.dimensions + dimension]
    }
}

/// Anomaly score per observation index, each in [0.0, 1.0].
/// 1.0 is the most anomalous. Serialized as a bare array; deserializing
/// applies the same range check as `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ScoreTable {
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Wrap precomputed scores. Rejects values outside [0.0, 1.0] and NaN.
    pub fn new(scores: Vec<f64>) -> Result<Self, ForestError> {
        if let Some((index, bad)) = scores
            .iter()
            .enumerate()
            .find(|(_, s)| !(0.0..=1.0).contains(*s))
        {
            return Err(ForestError::invalid_parameter(
                "scores",
                format!("score {bad} at index {index} is outside [0, 1]"),
            ));
        }
        Ok(Self { scores })
    }

    /// Scores produced by the normalizer are in range by construction.
    pub(crate) fn from_normalized(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.scores.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.scores.iter().copied()
    }

    /// Distribution summary, `None` when the table is empty.
    pub fn summary(&self) -> Option<ScoreSummary> {
        if self.scores.is_empty() {
            return None;
        }
        Some(ScoreSummary {
            min: Statistics::min(&self.scores),
            max: Statistics::max(&self.scores),
            mean: Statistics::mean(&self.scores),
            median: Data::new(self.scores.clone()).median(),
        })
    }
}

impl TryFrom<Vec<f64>> for ScoreTable {
    type Error = ForestError;

    fn try_from(scores: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(scores)
    }
}

impl From<ScoreTable> for Vec<f64> {
    fn from(table: ScoreTable) -> Self {
        table.scores
    }
}

/// Summary statistics over a score table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={:.4} max={:.4} mean={:.4} median={:.4}",
            self.min, self.max, self.mean, self.median
        )
    }
}

/// Observations flagged as anomalous.
///
/// `indices` is strictly increasing. Its length can exceed `target_count`
/// when several scores tie at the threshold: all ties are included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Flagged observation indices, ascending.
    pub indices: Vec<usize>,
    /// Score cut-off; `None` when there were no scores to rank.
    pub threshold: Option<f64>,
    /// `floor(contamination * n)`, at least 1 once anything was scored.
    pub target_count: usize,
}

impl AnomalyResult {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Entries admitted beyond `target_count` because of ties.
    pub fn tie_overflow(&self) -> usize {
        self.indices.len().saturating_sub(self.target_count)
    }

    /// Per-observation labels for `n` observations: `-1` anomalous, `1` inlier.
    pub fn labels(&self, n: usize) -> Vec<i8> {
        let mut labels = vec![1; n];
        for &index in &self.indices {
            if let Some(label) = labels.get_mut(index) {
                *label = -1;
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_rejects_empty_and_ragged() {
        assert!(Dataset::new(Vec::new()).is_err());
        assert!(Dataset::new(vec![Vec::new()]).is_err());
        let err = Dataset::new(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.to_string().contains("observation 1"));
    }

    #[test]
    fn test_dataset_rejects_non_finite() {
        assert!(Dataset::from_scalars(&[1.0, f64::NAN]).is_err());
        assert!(Dataset::from_scalars(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_dataset_layout() {
        let ds = Dataset::new(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dimensions(), 2);
        assert_eq!(ds.observation(1), &[3.0, 4.0]);
        assert_eq!(ds.value(2, 0), 5.0);
        assert_eq!(ds.observations().count(), 3);
    }

    #[test]
    fn test_score_table_range_check() {
        assert!(ScoreTable::new(vec![0.0, 0.5, 1.0]).is_ok());
        assert!(ScoreTable::new(vec![1.5]).is_err());
        assert!(ScoreTable::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_score_table_serde_checks_range() {
        let table = ScoreTable::new(vec![0.25, 0.75]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, "[0.25,0.75]");
        let back: ScoreTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let err = serde_json::from_str::<ScoreTable>("[0.5, 1.5]").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn test_summary() {
        let table = ScoreTable::new(vec![0.2, 0.4, 0.6, 0.8]).unwrap();
        let summary = table.summary().unwrap();
        assert!((summary.min - 0.2).abs() < 1e-12);
        assert!((summary.max - 0.8).abs() < 1e-12);
        assert!((summary.mean - 0.5).abs() < 1e-12);
        assert!((summary.median - 0.5).abs() < 1e-12);
        assert!(ScoreTable::new(Vec::new()).unwrap().summary().is_none());
    }

    #[test]
    fn test_labels() {
        let result = AnomalyResult {
            indices: vec![1, 3],
            threshold: Some(0.7),
            target_count: 2,
        };
        assert_eq!(result.labels(5), vec![1, -1, 1, -1, 1]);
        assert!(result.contains(3));
        assert!(!result.contains(2));
        assert_eq!(result.tie_overflow(), 0);
    }
}
