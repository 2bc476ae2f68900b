//! Tests for the Isoscope configuration system.

use std::sync::Mutex;

use isoscope_core::config::{CliOverrides, IsoscopeConfig};
use isoscope_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 6] = [
    "ISOSCOPE_FOREST_ENSEMBLE_SIZE",
    "ISOSCOPE_FOREST_SUBSAMPLE_SIZE",
    "ISOSCOPE_FOREST_CONTAMINATION",
    "ISOSCOPE_FOREST_SEED",
    "ISOSCOPE_FOREST_THREADS",
    "ISOSCOPE_SERVICE_MAX_OBSERVATIONS",
];

/// Clear all ISOSCOPE_ env vars and point HOME at an empty directory so a
/// developer's user config cannot leak into the test.
fn isolate_env(home: &std::path::Path) {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let project = tempfile::TempDir::new().unwrap();
    std::fs::write(
        project.path().join("isoscope.toml"),
        r#"
[forest]
ensemble_size = 50
contamination = 0.2
seed = 7
"#,
    )
    .unwrap();

    // Env overrides project for ensemble_size
    std::env::set_var("ISOSCOPE_FOREST_ENSEMBLE_SIZE", "80");

    let cli = CliOverrides {
        contamination: Some(0.05),
        ..Default::default()
    };

    let config = IsoscopeConfig::load(project.path(), Some(&cli)).unwrap();

    assert_eq!(config.forest.ensemble_size, Some(80));
    assert_eq!(config.forest.contamination, Some(0.05));
    // Project value survives where nothing overrides it
    assert_eq!(config.forest.seed, Some(7));

    isolate_env(home.path());
}

#[test]
fn test_user_config_is_lowest_file_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let user_dir = home.path().join(".isoscope");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[forest]\nensemble_size = 10\nsubsample_size = 32\n",
    )
    .unwrap();

    let project = tempfile::TempDir::new().unwrap();
    std::fs::write(
        project.path().join("isoscope.toml"),
        "[forest]\nensemble_size = 20\n",
    )
    .unwrap();

    let config = IsoscopeConfig::load(project.path(), None).unwrap();
    assert_eq!(config.forest.ensemble_size, Some(20));
    assert_eq!(config.forest.subsample_size, Some(32));
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let project = tempfile::TempDir::new().unwrap();
    let config = IsoscopeConfig::load(project.path(), None).unwrap();

    assert_eq!(config, IsoscopeConfig::default());
    assert_eq!(config.forest.effective_ensemble_size(), 100);
    assert_eq!(config.service.effective_max_observations(), 100_000);
}

#[test]
fn test_unparseable_env_value_is_skipped() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());
    std::env::set_var("ISOSCOPE_FOREST_SEED", "not-a-number");

    let project = tempfile::TempDir::new().unwrap();
    let config = IsoscopeConfig::load(project.path(), None).unwrap();
    assert_eq!(config.forest.seed, None);

    isolate_env(home.path());
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let project = tempfile::TempDir::new().unwrap();
    std::fs::write(project.path().join("isoscope.toml"), "[forest\nbroken").unwrap();

    let err = IsoscopeConfig::load(project.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_out_of_range_contamination() {
    for bad in [0.0, -0.1, 0.51, f64::NAN] {
        let config = IsoscopeConfig {
            forest: isoscope_core::config::ForestConfig {
                contamination: Some(bad),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = IsoscopeConfig::validate(&config).unwrap_err();
        match err {
            ConfigError::ValidationFailed { field, .. } => {
                assert_eq!(field, "forest.contamination")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn test_validation_rejects_zero_sizes() {
    let config = IsoscopeConfig::from_toml("[forest]\nensemble_size = 0\n").unwrap();
    assert!(IsoscopeConfig::validate(&config).is_err());

    let config = IsoscopeConfig::from_toml("[forest]\nsubsample_size = 0\n").unwrap();
    assert!(IsoscopeConfig::validate(&config).is_err());

    let config = IsoscopeConfig::from_toml("[service]\nmax_observations = 0\n").unwrap();
    assert!(IsoscopeConfig::validate(&config).is_err());
}

#[test]
fn test_toml_round_trip_and_unknown_keys() {
    let config = IsoscopeConfig::from_toml(
        r#"
[forest]
ensemble_size = 64
contamination = 0.25
future_knob = true

[service]
max_observations = 500
"#,
    )
    .unwrap();
    assert_eq!(config.forest.ensemble_size, Some(64));
    assert_eq!(config.service.max_observations, Some(500));

    let text = config.to_toml().unwrap();
    let back = IsoscopeConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}
