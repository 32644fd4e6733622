//! Batch runner: every (facility, metric, scenario) combination of a dataset.
//!
//! Combinations are independent and run in parallel on rayon. Each derives
//! its own seed from the global seed and its identity, so results do not
//! depend on scheduling. A failing combination is recorded and the rest
//! carry on.

use std::sync::Arc;

use rand::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use opsim_core::config::{OpsimConfig, ScenarioConfig};
use opsim_core::errors::{ConfigError, DataError, OpsimErrorCode, ProjectionError};
use opsim_core::types::{HistoricalSeries, ScenarioDefinition, ScenarioTable, SeriesKey};

use super::projector::{ScenarioProjector, DEFAULT_NUM_PATHS};
use super::seed::derive_run_seed;
use super::trend::{TrendMethod, Volatility};
use super::types::ProjectionResult;
use crate::dataset::MetricDataset;

/// Parameters shared by every projection in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSettings {
    pub horizon_months: usize,
    pub num_paths: usize,
    pub volatility: Volatility,
    pub trend: TrendMethod,
    /// Global seed. `None` draws one per batch, recorded in the outcome.
    pub seed: Option<u64>,
    pub lower_percentile: f64,
    pub upper_percentile: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            num_paths: DEFAULT_NUM_PATHS,
            volatility: Volatility::default(),
            trend: TrendMethod::default(),
            seed: None,
            lower_percentile: 10.0,
            upper_percentile: 90.0,
        }
    }
}

impl ProjectionSettings {
    /// Settings from the `[scenarios]` section; the longest reporting
    /// horizon is the one simulated.
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self {
            horizon_months: config.max_horizon(),
            num_paths: config.effective_num_simulations(),
            volatility: Volatility::Historical {
                scale: config.effective_noise_scale(),
            },
            trend: TrendMethod::RecentWindow(config.effective_trend_window()),
            seed: config.seed,
            lower_percentile: config.effective_lower_percentile(),
            upper_percentile: config.effective_upper_percentile(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Projector for one combination, seeded with its derived run seed.
    pub fn projector(&self, run_seed: u64) -> ScenarioProjector {
        ScenarioProjector::new(self.horizon_months, self.num_paths)
            .with_volatility_source(self.volatility)
            .with_trend(self.trend)
            .with_bounds(self.lower_percentile, self.upper_percentile)
            .with_seed(run_seed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projector(0).validate()
    }
}

/// Restricts a batch to a subset of facilities, metrics, or scenarios.
/// `None` means all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchRequest {
    pub facilities: Option<Vec<String>>,
    pub metrics: Option<Vec<String>>,
    pub scenarios: Option<Vec<String>>,
}

impl BatchRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_facilities<I, S>(mut self, facilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facilities = Some(facilities.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scenarios<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenarios = Some(scenarios.into_iter().map(Into::into).collect());
        self
    }
}

fn selected(filter: &Option<Vec<String>>, name: &str) -> bool {
    filter
        .as_ref()
        .map_or(true, |names| names.iter().any(|n| n == name))
}

/// One combination that could not be projected.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationFailure {
    pub key: SeriesKey,
    pub scenario: String,
    pub error: ProjectionError,
}

impl Serialize for CombinationFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CombinationFailure", 5)?;
        state.serialize_field("facility", &self.key.facility)?;
        state.serialize_field("metric", &self.key.metric)?;
        state.serialize_field("scenario", &self.scenario)?;
        state.serialize_field("code", self.error.error_code())?;
        state.serialize_field("message", &self.error.to_string())?;
        state.end()
    }
}

/// Result of a batch: successful projections plus per-combination failures.
///
/// Results are ordered by facility and metric (dataset order), then scenario
/// table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ProjectionResult>,
    pub failures: Vec<CombinationFailure>,
    /// Seed every run seed was derived from.
    pub global_seed: u64,
}

impl BatchOutcome {
    /// True when every combination projected.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn get(&self, facility: &str, metric: &str, scenario: &str) -> Option<&ProjectionResult> {
        self.results
            .iter()
            .find(|r| r.facility() == facility && r.metric() == metric && r.scenario() == scenario)
    }

    /// All scenario results for one series, in scenario table order.
    pub fn results_for<'a>(&'a self, key: &'a SeriesKey) -> impl Iterator<Item = &'a ProjectionResult> {
        self.results.iter().filter(move |r| r.key() == key)
    }
}

/// Runs scenario projections across a dataset.
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    scenarios: Arc<ScenarioTable>,
    settings: ProjectionSettings,
}

impl ScenarioEngine {
    pub fn new(scenarios: Arc<ScenarioTable>, settings: ProjectionSettings) -> Self {
        Self { scenarios, settings }
    }

    pub fn from_config(config: &OpsimConfig) -> Result<Self, ConfigError> {
        let table = config.scenarios.scenario_table()?;
        let settings = ProjectionSettings::from_config(&config.scenarios);
        settings.validate()?;
        Ok(Self::new(Arc::new(table), settings))
    }

    pub fn scenarios(&self) -> &Arc<ScenarioTable> {
        &self.scenarios
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// Project every series in `dataset` under every scenario.
    pub fn run(&self, dataset: &MetricDataset) -> Result<BatchOutcome, ProjectionError> {
        self.run_request(dataset, &BatchRequest::all())
    }

    /// Project the combinations selected by `request`.
    ///
    /// Fails as a whole only for invalid settings, an unknown scenario name,
    /// or an empty dataset. Everything else is a per-combination failure.
    pub fn run_request(
        &self,
        dataset: &MetricDataset,
        request: &BatchRequest,
    ) -> Result<BatchOutcome, ProjectionError> {
        self.settings.validate()?;
        if dataset.is_empty() {
            return Err(DataError::EmptyDataset.into());
        }
        if let Some(names) = &request.scenarios {
            for name in names {
                self.scenarios.get(name)?;
            }
        }
        let scenarios: Vec<&ScenarioDefinition> = self
            .scenarios
            .iter()
            .filter(|s| selected(&request.scenarios, &s.name))
            .collect();

        let metrics: Vec<&str> = dataset
            .metrics()
            .into_iter()
            .filter(|m| selected(&request.metrics, m))
            .collect();
        let mut series: Vec<(SeriesKey, Result<HistoricalSeries, DataError>)> = Vec::new();
        for facility in dataset.facilities() {
            if !selected(&request.facilities, facility) {
                continue;
            }
            for &metric in &metrics {
                series.push((
                    SeriesKey::new(facility, metric),
                    dataset.series(facility, metric),
                ));
            }
        }

        let mut combinations: Vec<(usize, &ScenarioDefinition)> =
            Vec::with_capacity(series.len() * scenarios.len());
        for i in 0..series.len() {
            for &scenario in &scenarios {
                combinations.push((i, scenario));
            }
        }

        let global_seed = self.settings.seed.unwrap_or_else(|| thread_rng().gen());
        let span = tracing::info_span!(
            "scenario_batch",
            series = series.len(),
            scenarios = scenarios.len(),
            combinations = combinations.len(),
            global_seed
        );
        let _guard = span.enter();

        // Indexed parallel collect keeps combination order.
        let runs: Vec<Result<ProjectionResult, CombinationFailure>> = combinations
            .par_iter()
            .map(|&(i, scenario)| {
                let (key, history) = &series[i];
                let run_seed = derive_run_seed(global_seed, key, &scenario.name);
                let projected = match history {
                    Ok(h) => self.settings.projector(run_seed).project(h, scenario),
                    Err(e) => Err(e.clone().into()),
                };
                projected.map_err(|error| CombinationFailure {
                    key: key.clone(),
                    scenario: scenario.name.clone(),
                    error,
                })
            })
            .collect();

        let mut outcome = BatchOutcome {
            results: Vec::with_capacity(runs.len()),
            failures: Vec::new(),
            global_seed,
        };
        for run in runs {
            match run {
                Ok(result) => outcome.results.push(result),
                Err(failure) => {
                    tracing::warn!(
                        series = %failure.key,
                        scenario = %failure.scenario,
                        code = failure.error.error_code(),
                        error = %failure.error,
                        "projection failed"
                    );
                    outcome.failures.push(failure);
                }
            }
        }

        tracing::info!(
            projected = outcome.results.len(),
            failed = outcome.failures.len(),
            "scenario batch complete"
        );
        Ok(outcome)
    }
}
