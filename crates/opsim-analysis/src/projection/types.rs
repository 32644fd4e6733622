//! Projection result types.

use serde::Serialize;

use opsim_core::types::SeriesKey;

/// One simulated trajectory, `horizon_months` values long.
pub type SimulationPath = Vec<f64>;

/// Distribution of simulated values at one future step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepSummary {
    /// 1-based month ahead of the last observation.
    pub step: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation across paths.
    pub std_dev: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    /// Percentile at the configured lower band, lowered to the mean if needed.
    pub lower_bound: f64,
    /// Percentile at the configured upper band, raised to the mean if needed.
    pub upper_bound: f64,
}

/// One row of a fan chart: central line and shaded band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FanRow {
    pub step: usize,
    pub mean: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Aggregated projection for one (facility, metric, scenario).
///
/// Immutable once built; `steps().len()` equals the requested horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    key: SeriesKey,
    scenario: String,
    multiplier: f64,
    anchor: f64,
    trend: f64,
    volatility: f64,
    num_paths: usize,
    seed: u64,
    lower_percentile: f64,
    upper_percentile: f64,
    steps: Vec<StepSummary>,
}

impl ProjectionResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        key: SeriesKey,
        scenario: String,
        multiplier: f64,
        anchor: f64,
        trend: f64,
        volatility: f64,
        num_paths: usize,
        seed: u64,
        bounds: (f64, f64),
        steps: Vec<StepSummary>,
    ) -> Self {
        Self {
            key,
            scenario,
            multiplier,
            anchor,
            trend,
            volatility,
            num_paths,
            seed,
            lower_percentile: bounds.0,
            upper_percentile: bounds.1,
            steps,
        }
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn facility(&self) -> &str {
        &self.key.facility
    }

    pub fn metric(&self) -> &str {
        &self.key.metric
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Last observed value; every path starts here.
    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    /// Estimated historical trend, before the scenario multiplier.
    pub fn trend(&self) -> f64 {
        self.trend
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Seed the run's paths were derived from; replaying it reproduces the result.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lower_percentile(&self) -> f64 {
        self.lower_percentile
    }

    pub fn upper_percentile(&self) -> f64 {
        self.upper_percentile
    }

    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepSummary] {
        &self.steps
    }

    /// Summary at a 1-based step.
    pub fn step(&self, step: usize) -> Option<&StepSummary> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn final_step(&self) -> Option<&StepSummary> {
        self.steps.last()
    }

    pub fn mean_trajectory(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.mean).collect()
    }

    /// Table of (step, mean, lower, upper) for fan-chart rendering.
    pub fn fan_rows(&self) -> Vec<FanRow> {
        self.steps
            .iter()
            .map(|s| FanRow {
                step: s.step,
                mean: s.mean,
                lower_bound: s.lower_bound,
                upper_bound: s.upper_bound,
            })
            .collect()
    }
}
