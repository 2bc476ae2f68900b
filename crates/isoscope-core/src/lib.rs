//! isoscope-core: errors, config, tracing, cancellation, and constants
//! shared by the Isoscope anomaly engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
