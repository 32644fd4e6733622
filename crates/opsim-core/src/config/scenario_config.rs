//! Scenario modeling configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{ScenarioDefinition, ScenarioTable};

/// Compiled-in scenario table: trend amplification of +15%, 1.0x, -15%, -30%.
pub const DEFAULT_VARIATIONS: [(&str, f64); 4] = [
    ("optimistic", 1.15),
    ("baseline", 1.0),
    ("pessimistic", 0.85),
    ("worst_case", 0.70),
];

/// Configuration for the Monte Carlo scenario engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Scenario name -> trend multiplier. Empty means the compiled defaults.
    #[serde(default)]
    pub variations: BTreeMap<String, f64>,
    /// Paths simulated per projection. Default: 200.
    pub num_simulations: Option<usize>,
    /// Reporting horizons in months; the longest one is simulated. Default: [3, 6, 12].
    #[serde(default)]
    pub time_horizons: Vec<usize>,
    /// Global seed. `None` draws a fresh seed per batch.
    pub seed: Option<u64>,
    /// Historical std-dev multiplier used as per-step volatility. Default: 0.3.
    pub noise_scale: Option<f64>,
    /// Trailing observations used to estimate the trend. Default: 6.
    pub trend_window: Option<usize>,
    /// Lower band percentile. Default: 10.
    pub lower_percentile: Option<f64>,
    /// Upper band percentile. Default: 90.
    pub upper_percentile: Option<f64>,
}

impl ScenarioConfig {
    pub fn effective_num_simulations(&self) -> usize {
        self.num_simulations.unwrap_or(200)
    }

    pub fn effective_time_horizons(&self) -> Vec<usize> {
        if self.time_horizons.is_empty() {
            vec![3, 6, 12]
        } else {
            self.time_horizons.clone()
        }
    }

    /// The horizon actually simulated: the longest reporting horizon.
    pub fn max_horizon(&self) -> usize {
        self.effective_time_horizons().into_iter().max().unwrap_or(12)
    }

    pub fn effective_noise_scale(&self) -> f64 {
        self.noise_scale.unwrap_or(0.3)
    }

    pub fn effective_trend_window(&self) -> usize {
        self.trend_window.unwrap_or(6)
    }

    pub fn effective_lower_percentile(&self) -> f64 {
        self.lower_percentile.unwrap_or(10.0)
    }

    pub fn effective_upper_percentile(&self) -> f64 {
        self.upper_percentile.unwrap_or(90.0)
    }

    /// Build the immutable scenario table from `variations`, or the defaults.
    pub fn scenario_table(&self) -> Result<ScenarioTable, ConfigError> {
        if self.variations.is_empty() {
            return ScenarioTable::from_pairs(DEFAULT_VARIATIONS);
        }
        ScenarioTable::new(
            self.variations
                .iter()
                .map(|(name, &multiplier)| ScenarioDefinition::new(name.clone(), multiplier)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ScenarioConfig::default();
        assert_eq!(cfg.effective_num_simulations(), 200);
        assert_eq!(cfg.max_horizon(), 12);
        assert_eq!(cfg.scenario_table().unwrap().len(), 4);
    }

    #[test]
    fn test_configured_variations_replace_defaults() {
        let mut cfg = ScenarioConfig::default();
        cfg.variations.insert("steady".into(), 1.0);
        cfg.variations.insert("boom".into(), 1.5);
        let table = cfg.scenario_table().unwrap();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["boom", "steady"]);
    }
}
