//! Request layer configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_OBSERVATIONS;

/// Configuration for the request-handling layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Maximum observations accepted per request. Default: 100_000.
    pub max_observations: Option<usize>,
}

impl ServiceConfig {
    /// Returns the effective observation cap, defaulting to 100_000.
    pub fn effective_max_observations(&self) -> usize {
        self.max_observations.unwrap_or(DEFAULT_MAX_OBSERVATIONS)
    }
}
