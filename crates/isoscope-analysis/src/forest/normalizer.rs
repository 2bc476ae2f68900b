//! Path length → anomaly score.

use isoscope_core::errors::ForestError;

use super::path_length::average_path_length;

/// Maps an average path length to `2^(-h / c(s))` for subsample size `s`.
///
/// Short paths (easily isolated) approach 1.0, long paths approach 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreNormalizer {
    subsample_size: usize,
    expected_path_length: f64,
}

impl ScoreNormalizer {
    /// Fails for `subsample_size <= 1`, where `c(s)` is zero.
    pub fn new(subsample_size: usize) -> Result<Self, ForestError> {
        if subsample_size <= 1 {
            return Err(ForestError::invalid_parameter(
                "subsample_size",
                format!("must be greater than 1 to normalize scores, got {subsample_size}"),
            ));
        }
        Ok(Self {
            subsample_size,
            expected_path_length: average_path_length(subsample_size),
        })
    }

    pub fn subsample_size(&self) -> usize {
        self.subsample_size
    }

    /// `c(s)`, the typical path length at this subsample size.
    pub fn expected_path_length(&self) -> f64 {
        self.expected_path_length
    }

    pub fn normalize(&self, average_path_length: f64) -> f64 {
        2f64.powf(-average_path_length / self.expected_path_length)
            .clamp(0.0, 1.0)
    }
}

/// One-shot form of [`ScoreNormalizer::normalize`].
pub fn normalize(average_path_length: f64, subsample_size: usize) -> Result<f64, ForestError> {
    Ok(ScoreNormalizer::new(subsample_size)?.normalize(average_path_length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        let normalizer = ScoreNormalizer::new(256).unwrap();
        let c = normalizer.expected_path_length();
        assert!((normalizer.normalize(0.0) - 1.0).abs() < 1e-12);
        assert!((normalizer.normalize(c) - 0.5).abs() < 1e-12);
        assert!(normalizer.normalize(1_000.0) < 1e-6);
    }

    #[test]
    fn test_shorter_path_scores_higher() {
        let normalizer = ScoreNormalizer::new(64).unwrap();
        assert!(normalizer.normalize(2.0) > normalizer.normalize(6.0));
    }

    #[test]
    fn test_degenerate_subsample() {
        assert!(normalize(1.0, 0).is_err());
        assert!(normalize(1.0, 1).is_err());
        // c(2) = 1, so a path of 1 maps to exactly 0.5
        assert!((normalize(1.0, 2).unwrap() - 0.5).abs() < 1e-12);
    }
}
