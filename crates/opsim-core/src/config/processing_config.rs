//! Processing statistics configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessingConfig {
    /// |z| above which a point is flagged as an anomaly. Default: 2.0.
    pub z_threshold: Option<f64>,
    /// |r| above which a correlation counts as strong. Default: 0.5.
    pub correlation_threshold: Option<f64>,
}

impl ProcessingConfig {
    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(2.0)
    }

    pub fn effective_correlation_threshold(&self) -> f64 {
        self.correlation_threshold.unwrap_or(0.5)
    }
}
