//! Isolation forest anomaly detection.
//!
//! Data flow per run:
//! - `sampler` draws a subsample per tree
//! - `tree` partitions it at random until isolation or the height limit
//! - `ensemble` averages path lengths across trees
//! - `normalizer` maps the average to a score in [0, 1]
//! - `classifier` flags the top `contamination` share, ties included

pub mod classifier;
pub mod detector;
pub mod ensemble;
pub mod normalizer;
pub mod path_length;
pub mod sampler;
pub mod tree;
pub mod types;

pub use classifier::AnomalyClassifier;
pub use detector::{fit_and_score, AnomalyDetector, Detection, ForestParams};
pub use ensemble::IsolationForest;
pub use normalizer::ScoreNormalizer;
pub use path_length::average_path_length;
pub use sampler::Sampler;
pub use tree::IsolationTree;
pub use types::{AnomalyResult, Dataset, ScoreSummary, ScoreTable};
