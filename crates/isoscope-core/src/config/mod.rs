//! Configuration system for Isoscope.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod forest_config;
pub mod isoscope_config;
pub mod service_config;

pub use forest_config::ForestConfig;
pub use isoscope_config::{CliOverrides, IsoscopeConfig};
pub use service_config::ServiceConfig;
