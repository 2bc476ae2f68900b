//! Structured field names for Isoscope tracing events.
//!
//! Every subsystem logs with these names so log queries line up
//! across fit, score, classify, and the request layer.

/// Fit: wall time to build the ensemble in milliseconds.
pub const FIT_TIME_MS: &str = "fit_time_ms";

/// Score: wall time to score a dataset in milliseconds.
pub const SCORE_TIME_MS: &str = "score_time_ms";

/// Fit: number of trees built.
pub const TREE_COUNT: &str = "tree_count";

/// Fit: per-tree subsample size.
pub const SUBSAMPLE_SIZE: &str = "subsample_size";

/// Fit: depth bound applied to every tree.
pub const HEIGHT_LIMIT: &str = "height_limit";

/// Fit/Score: number of observations processed.
pub const OBSERVATION_COUNT: &str = "observation_count";

/// Classify: number of flagged observations.
pub const FLAGGED_COUNT: &str = "flagged_count";

/// Classify: score threshold applied.
pub const THRESHOLD: &str = "threshold";

/// Fit: base seed the per-tree streams derive from.
pub const SEED: &str = "seed";
