//! Tabular views of batch outcomes for downstream reporting.

pub mod tables;

pub use tables::{
    endpoint_summary, flat_rows, horizon_checkpoints, scenario_means_by_name, scenario_spread,
    EndpointSummary, HorizonCheckpoint, ScenarioAverage, ScenarioRow, ScenarioSpread,
};
