//! isoscope-analysis: isolation forest scoring, contamination-based
//! classification, and the request handler that fronts them.

pub mod forest;
pub mod service;

pub use forest::{fit_and_score, AnomalyResult, Dataset, IsolationForest};
