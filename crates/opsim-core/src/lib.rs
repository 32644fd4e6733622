//! opsim-core: shared foundation for the opsim scenario modeling engine.
//!
//! - Errors: one `thiserror` enum per concern, stable error codes
//! - Config: TOML-based, layered resolution (overrides > env > project > user > defaults)
//! - Tracing: `OPSIM_LOG`-driven subscriber setup
//! - Types: historical series, series keys, scenario definitions

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::OpsimConfig;
pub use errors::{ConfigError, DataError, ProjectionError};
pub use types::{HistoricalSeries, ScenarioDefinition, ScenarioTable, SeriesKey};
