//! Synthetic data generation configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FACILITIES: [&str; 3] = ["Plant Alpha", "Plant Beta", "Plant Gamma"];

/// Configuration for the sample data generator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Months of history per series. Default: 24.
    pub num_months: Option<usize>,
    /// Facilities to generate. Default: Plant Alpha, Plant Beta, Plant Gamma.
    #[serde(default)]
    pub facility_names: Vec<String>,
    /// Generator seed. Default: 42.
    pub seed: Option<u64>,
    /// Per-observation probability of an injected shock. Default: 0.03.
    pub anomaly_rate: Option<f64>,
}

impl DataConfig {
    pub fn effective_num_months(&self) -> usize {
        self.num_months.unwrap_or(24)
    }

    pub fn effective_facility_names(&self) -> Vec<String> {
        if self.facility_names.is_empty() {
            DEFAULT_FACILITIES.iter().map(|s| s.to_string()).collect()
        } else {
            self.facility_names.clone()
        }
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }

    pub fn effective_anomaly_rate(&self) -> f64 {
        self.anomaly_rate.unwrap_or(0.03)
    }
}
