//! Top-level Isoscope configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ForestConfig, ServiceConfig};
use crate::constants::{MAX_CONTAMINATION, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ISOSCOPE_*`)
/// 3. Project config (`isoscope.toml` in project root)
/// 4. User config (`~/.isoscope/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IsoscopeConfig {
    pub forest: ForestConfig,
    pub service: ServiceConfig,
}

/// Override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ensemble_size: Option<usize>,
    pub subsample_size: Option<usize>,
    pub contamination: Option<f64>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl IsoscopeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): overrides
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &IsoscopeConfig) -> Result<(), ConfigError> {
        if config.forest.ensemble_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "forest.ensemble_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.forest.subsample_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "forest.subsample_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(contamination) = config.forest.contamination {
            if !(contamination > 0.0 && contamination <= MAX_CONTAMINATION) {
                return Err(ConfigError::ValidationFailed {
                    field: "forest.contamination".to_string(),
                    message: format!("must be in (0, {MAX_CONTAMINATION}]"),
                });
            }
        }
        if config.service.max_observations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "service.max_observations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.isoscope/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut IsoscopeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: IsoscopeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut IsoscopeConfig, other: &IsoscopeConfig) {
        // Forest
        if other.forest.ensemble_size.is_some() {
            base.forest.ensemble_size = other.forest.ensemble_size;
        }
        if other.forest.subsample_size.is_some() {
            base.forest.subsample_size = other.forest.subsample_size;
        }
        if other.forest.contamination.is_some() {
            base.forest.contamination = other.forest.contamination;
        }
        if other.forest.seed.is_some() {
            base.forest.seed = other.forest.seed;
        }
        if other.forest.threads.is_some() {
            base.forest.threads = other.forest.threads;
        }

        // Service
        if other.service.max_observations.is_some() {
            base.service.max_observations = other.service.max_observations;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `ISOSCOPE_FOREST_ENSEMBLE_SIZE`, `ISOSCOPE_SERVICE_MAX_OBSERVATIONS`, etc.
    /// Unparseable values are skipped.
    fn apply_env_overrides(config: &mut IsoscopeConfig) {
        if let Some(v) = env_parse::<usize>("ISOSCOPE_FOREST_ENSEMBLE_SIZE") {
            config.forest.ensemble_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("ISOSCOPE_FOREST_SUBSAMPLE_SIZE") {
            config.forest.subsample_size = Some(v);
        }
        if let Some(v) = env_parse::<f64>("ISOSCOPE_FOREST_CONTAMINATION") {
            config.forest.contamination = Some(v);
        }
        if let Some(v) = env_parse::<u64>("ISOSCOPE_FOREST_SEED") {
            config.forest.seed = Some(v);
        }
        if let Some(v) = env_parse::<usize>("ISOSCOPE_FOREST_THREADS") {
            config.forest.threads = Some(v);
        }
        if let Some(v) = env_parse::<usize>("ISOSCOPE_SERVICE_MAX_OBSERVATIONS") {
            config.service.max_observations = Some(v);
        }
    }

    /// Apply overrides (highest priority).
    fn apply_cli_overrides(config: &mut IsoscopeConfig, cli: &CliOverrides) {
        if let Some(v) = cli.ensemble_size {
            config.forest.ensemble_size = Some(v);
        }
        if let Some(v) = cli.subsample_size {
            config.forest.subsample_size = Some(v);
        }
        if let Some(v) = cli.contamination {
            config.forest.contamination = Some(v);
        }
        if let Some(v) = cli.seed {
            config.forest.seed = Some(v);
        }
        if let Some(v) = cli.threads {
            config.forest.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

/// Returns the user-level config directory: `~/.isoscope/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".isoscope"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
