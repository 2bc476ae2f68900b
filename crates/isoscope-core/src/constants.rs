//! Shared constants for the Isoscope anomaly engine.

/// Isoscope version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of trees in the ensemble.
pub const DEFAULT_ENSEMBLE_SIZE: usize = 100;

/// Upper bound on the per-tree subsample; the effective default is `min(256, n)`.
pub const DEFAULT_MAX_SUBSAMPLE_SIZE: usize = 256;

/// Default expected proportion of anomalies.
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Largest contamination accepted by the classifier.
pub const MAX_CONTAMINATION: f64 = 0.5;

/// Default worker threads (0 = rayon global pool).
pub const DEFAULT_THREADS: usize = 0;

/// Default cap on observations accepted in one request.
pub const DEFAULT_MAX_OBSERVATIONS: usize = 100_000;

/// Euler–Mascheroni constant used in the harmonic number approximation.
pub const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "isoscope.toml";
