//! Top-level opsim configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DataConfig, ProcessingConfig, ScenarioConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`OPSIM_*`)
/// 3. Project config (`opsim.toml` in project root)
/// 4. User config (`~/.opsim/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpsimConfig {
    pub data: DataConfig,
    pub scenarios: ScenarioConfig,
    pub processing: ProcessingConfig,
}

/// Caller-supplied overrides that beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub num_simulations: Option<usize>,
    pub scenario_seed: Option<u64>,
    pub data_seed: Option<u64>,
    pub num_months: Option<usize>,
}

impl OpsimConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join("opsim.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        tracing::debug!(?config, "configuration resolved");
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
    pub fn validate(config: &OpsimConfig) -> Result<(), ConfigError> {
        let s = &config.scenarios;
        if s.num_simulations == Some(0) {
            return Err(ConfigError::validation(
                "scenarios.num_simulations",
                "must be greater than 0",
            ));
        }
        if s.time_horizons.contains(&0) {
            return Err(ConfigError::validation(
                "scenarios.time_horizons",
                "horizons must be greater than 0",
            ));
        }
        if let Some(scale) = s.noise_scale {
            if !scale.is_finite() || scale < 0.0 {
                return Err(ConfigError::validation(
                    "scenarios.noise_scale",
                    "must be a non-negative number",
                ));
            }
        }
        if let Some(window) = s.trend_window {
            if window < 2 {
                return Err(ConfigError::validation(
                    "scenarios.trend_window",
                    "must be at least 2",
                ));
            }
        }
        let lower = s.effective_lower_percentile();
        let upper = s.effective_upper_percentile();
        for (field, p) in [
            ("scenarios.lower_percentile", lower),
            ("scenarios.upper_percentile", upper),
        ] {
            if !(0.0..=100.0).contains(&p) {
                return Err(ConfigError::validation(field, "must be between 0 and 100"));
            }
        }
        if lower > upper {
            return Err(ConfigError::validation(
                "scenarios.lower_percentile",
                "must not exceed upper_percentile",
            ));
        }
        s.scenario_table()?;

        if config.data.num_months == Some(0) {
            return Err(ConfigError::validation(
                "data.num_months",
                "must be greater than 0",
            ));
        }
        if let Some(rate) = config.data.anomaly_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::validation(
                    "data.anomaly_rate",
                    "must be between 0.0 and 1.0",
                ));
            }
        }

        if let Some(z) = config.processing.z_threshold {
            if !z.is_finite() || z <= 0.0 {
                return Err(ConfigError::validation(
                    "processing.z_threshold",
                    "must be greater than 0",
                ));
            }
        }
        if let Some(r) = config.processing.correlation_threshold {
            if !(0.0..=1.0).contains(&r) {
                return Err(ConfigError::validation(
                    "processing.correlation_threshold",
                    "must be between 0.0 and 1.0",
                ));
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.opsim/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".opsim").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut OpsimConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: OpsimConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut OpsimConfig, other: &OpsimConfig) {
        // Data
        if other.data.num_months.is_some() {
            base.data.num_months = other.data.num_months;
        }
        if !other.data.facility_names.is_empty() {
            base.data.facility_names = other.data.facility_names.clone();
        }
        if other.data.seed.is_some() {
            base.data.seed = other.data.seed;
        }
        if other.data.anomaly_rate.is_some() {
            base.data.anomaly_rate = other.data.anomaly_rate;
        }

        // Scenarios
        if !other.scenarios.variations.is_empty() {
            base.scenarios.variations = other.scenarios.variations.clone();
        }
        if other.scenarios.num_simulations.is_some() {
            base.scenarios.num_simulations = other.scenarios.num_simulations;
        }
        if !other.scenarios.time_horizons.is_empty() {
            base.scenarios.time_horizons = other.scenarios.time_horizons.clone();
        }
        if other.scenarios.seed.is_some() {
            base.scenarios.seed = other.scenarios.seed;
        }
        if other.scenarios.noise_scale.is_some() {
            base.scenarios.noise_scale = other.scenarios.noise_scale;
        }
        if other.scenarios.trend_window.is_some() {
            base.scenarios.trend_window = other.scenarios.trend_window;
        }
        if other.scenarios.lower_percentile.is_some() {
            base.scenarios.lower_percentile = other.scenarios.lower_percentile;
        }
        if other.scenarios.upper_percentile.is_some() {
            base.scenarios.upper_percentile = other.scenarios.upper_percentile;
        }

        // Processing
        if other.processing.z_threshold.is_some() {
            base.processing.z_threshold = other.processing.z_threshold;
        }
        if other.processing.correlation_threshold.is_some() {
            base.processing.correlation_threshold = other.processing.correlation_threshold;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `OPSIM_SCENARIOS_NUM_SIMULATIONS`, `OPSIM_DATA_SEED`, etc.
    fn apply_env_overrides(config: &mut OpsimConfig) {
        if let Some(v) = env_parse::<usize>("OPSIM_SCENARIOS_NUM_SIMULATIONS") {
            config.scenarios.num_simulations = Some(v);
        }
        if let Some(v) = env_parse::<u64>("OPSIM_SCENARIOS_SEED") {
            config.scenarios.seed = Some(v);
        }
        if let Some(v) = env_parse::<f64>("OPSIM_SCENARIOS_NOISE_SCALE") {
            config.scenarios.noise_scale = Some(v);
        }
        if let Some(v) = env_parse::<usize>("OPSIM_DATA_NUM_MONTHS") {
            config.data.num_months = Some(v);
        }
        if let Some(v) = env_parse::<u64>("OPSIM_DATA_SEED") {
            config.data.seed = Some(v);
        }
        if let Some(v) = env_parse::<f64>("OPSIM_PROCESSING_Z_THRESHOLD") {
            config.processing.z_threshold = Some(v);
        }
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut OpsimConfig, o: &ConfigOverrides) {
        if let Some(v) = o.num_simulations {
            config.scenarios.num_simulations = Some(v);
        }
        if let Some(v) = o.scenario_seed {
            config.scenarios.seed = Some(v);
        }
        if let Some(v) = o.data_seed {
            config.data.seed = Some(v);
        }
        if let Some(v) = o.num_months {
            config.data.num_months = Some(v);
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

/// Read and parse an environment variable; unparsable values are ignored.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
