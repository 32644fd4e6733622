//! End-to-end run: generate, process, project, summarize.

use serde::Serialize;

use opsim_core::config::OpsimConfig;
use opsim_core::errors::ProjectionError;

use crate::dataset::MetricDataset;
use crate::export::{endpoint_summary, scenario_means_by_name, EndpointSummary, ScenarioAverage};
use crate::generation::SampleGenerator;
use crate::processing::{run_full_processing, ProcessingReport};
use crate::projection::{BatchOutcome, ScenarioEngine};

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub dataset: MetricDataset,
    pub processing: ProcessingReport,
    pub outcome: BatchOutcome,
    pub endpoints: Vec<EndpointSummary>,
    pub scenario_averages: Vec<ScenarioAverage>,
}

/// Generate a sample dataset from `[data]` and analyze it.
pub fn run_pipeline(config: &OpsimConfig) -> Result<PipelineReport, ProjectionError> {
    let dataset = SampleGenerator::from_config(&config.data).generate();
    analyze(dataset, config)
}

/// Process and project an existing dataset.
pub fn analyze(dataset: MetricDataset, config: &OpsimConfig) -> Result<PipelineReport, ProjectionError> {
    let _span = tracing::info_span!("pipeline", observations = dataset.len()).entered();

    let processing = run_full_processing(&dataset, &config.processing);
    let engine = ScenarioEngine::from_config(config)?;
    let outcome = engine.run(&dataset)?;
    let endpoints = endpoint_summary(&outcome);
    let scenario_averages = scenario_means_by_name(&endpoints);

    tracing::info!(
        endpoints = endpoints.len(),
        failures = outcome.failure_count(),
        strong_correlations = processing
            .strong_correlations(config.processing.effective_correlation_threshold())
            .len(),
        "pipeline complete"
    );

    Ok(PipelineReport {
        dataset,
        processing,
        outcome,
        endpoints,
        scenario_averages,
    })
}
