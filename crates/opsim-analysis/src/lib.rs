//! # opsim-analysis
//!
//! Synthetic KPI generation, descriptive statistics, and the Monte Carlo
//! scenario projection engine.
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Generate | `generation` | `MetricDataset` of monthly observations |
//! | Process | `processing` | summary, trends, anomalies, correlations |
//! | Project | `projection` | `BatchOutcome` of per-step percentile bands |
//! | Export | `export` | flat rows, endpoints, checkpoints, spreads |
//!
//! ## Reproducibility
//!
//! Every (facility, metric, scenario) run seeds from a hash of its identity
//! and the global seed; every path seeds from the run seed plus its index.
//! A fixed global seed reproduces a batch exactly, in any thread count.

pub mod dataset;
pub mod export;
pub mod generation;
pub mod pipeline;
pub mod processing;
pub mod projection;
pub mod stats;

pub use dataset::{MetricDataset, Observation};
pub use generation::SampleGenerator;
pub use pipeline::{analyze, run_pipeline, PipelineReport};
pub use processing::{run_full_processing, ProcessingReport};
pub use projection::{
    project, BatchOutcome, BatchRequest, ProjectionResult, ProjectionSettings, ScenarioEngine,
    ScenarioProjector, TrendMethod, Volatility,
};
