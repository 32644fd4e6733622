//! Shared domain types for opsim.

pub mod identifiers;
pub mod scenario;
pub mod series;

pub use identifiers::SeriesKey;
pub use scenario::{ScenarioDefinition, ScenarioTable};
pub use series::{HistoricalSeries, SeriesPoint};
