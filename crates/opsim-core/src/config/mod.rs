//! Configuration system for opsim.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod data_config;
pub mod opsim_config;
pub mod processing_config;
pub mod scenario_config;

pub use data_config::DataConfig;
pub use opsim_config::{ConfigOverrides, OpsimConfig};
pub use processing_config::ProcessingConfig;
pub use scenario_config::ScenarioConfig;
