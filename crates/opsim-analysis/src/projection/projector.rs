//! Single-series Monte Carlo projector.
//!
//! Every path owns its own `StdRng`, seeded from a hash of the run seed and
//! the path index, so paths share no random state (within or across runs)
//! and a run is reproducible from its seed alone.

use rand::prelude::*;
use statrs::distribution::Normal;

use opsim_core::errors::{ConfigError, DataError, ProjectionError};
use opsim_core::types::{HistoricalSeries, ScenarioDefinition};

use super::seed::derive_path_seed;
use super::trend::{TrendMethod, Volatility};
use super::types::{ProjectionResult, SimulationPath, StepSummary};
use crate::stats::{percentile_sorted, sort_floats, RunningStats};

/// Paths per projection when the caller does not say otherwise.
pub const DEFAULT_NUM_PATHS: usize = 200;

/// Observations needed to estimate a trend.
pub const MIN_HISTORY: usize = 2;

/// Monte Carlo projector for one historical series under one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioProjector {
    horizon_months: usize,
    num_paths: usize,
    volatility: Volatility,
    trend: TrendMethod,
    seed: Option<u64>,
    lower_percentile: f64,
    upper_percentile: f64,
}

/// Parameters resolved from history before sampling.
#[derive(Debug, Clone, Copy)]
struct RunPlan {
    anchor: f64,
    trend: f64,
    drift: f64,
    volatility: f64,
    seed: u64,
}

impl ScenarioProjector {
    /// Create a projector with historical volatility, a 6-point trend window,
    /// and a 10/90 band. Nothing is validated until `project`.
    pub fn new(horizon_months: usize, num_paths: usize) -> Self {
        Self {
            horizon_months,
            num_paths,
            volatility: Volatility::default(),
            trend: TrendMethod::default(),
            seed: None,
            lower_percentile: 10.0,
            upper_percentile: 90.0,
        }
    }

    /// Use a fixed per-step noise scale instead of the historical estimate.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Volatility::Fixed(volatility);
        self
    }

    pub fn with_volatility_source(mut self, volatility: Volatility) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_trend(mut self, trend: TrendMethod) -> Self {
        self.trend = trend;
        self
    }

    /// Set a deterministic seed for reproducible results.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Percentiles reported as `lower_bound` / `upper_bound`.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_percentile = lower;
        self.upper_percentile = upper;
        self
    }

    pub fn horizon_months(&self) -> usize {
        self.horizon_months
    }

    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Check every series-independent parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_months == 0 {
            return Err(ConfigError::validation("horizon_months", "must be greater than 0"));
        }
        if self.num_paths == 0 {
            return Err(ConfigError::validation("num_paths", "must be greater than 0"));
        }
        self.volatility.validate()?;
        self.trend.validate()?;
        for (field, p) in [
            ("lower_percentile", self.lower_percentile),
            ("upper_percentile", self.upper_percentile),
        ] {
            if !(0.0..=100.0).contains(&p) {
                return Err(ConfigError::validation(field, "must be between 0 and 100"));
            }
        }
        if self.lower_percentile > self.upper_percentile {
            return Err(ConfigError::validation(
                "lower_percentile",
                "must not exceed upper_percentile",
            ));
        }
        Ok(())
    }

    /// Project `series` forward under `scenario`.
    ///
    /// Fails before any sampling when parameters are invalid, the multiplier
    /// is not finite, or the series has fewer than two observations.
    pub fn project(
        &self,
        series: &HistoricalSeries,
        scenario: &ScenarioDefinition,
    ) -> Result<ProjectionResult, ProjectionError> {
        let plan = self.plan(series, scenario)?;
        let paths = self.sample_paths(&plan);
        let steps = self.summarize(&paths);

        tracing::debug!(
            series = %series.key(),
            scenario = %scenario.name,
            trend = plan.trend,
            volatility = plan.volatility,
            seed = plan.seed,
            "projection complete"
        );

        Ok(ProjectionResult::new(
            series.key().clone(),
            scenario.name.clone(),
            scenario.multiplier,
            plan.anchor,
            plan.trend,
            plan.volatility,
            self.num_paths,
            plan.seed,
            (self.lower_percentile, self.upper_percentile),
            steps,
        ))
    }

    /// Raw simulated paths, for callers that need more than the summary.
    pub fn simulate(
        &self,
        series: &HistoricalSeries,
        scenario: &ScenarioDefinition,
    ) -> Result<Vec<SimulationPath>, ProjectionError> {
        let plan = self.plan(series, scenario)?;
        Ok(self.sample_paths(&plan))
    }

    fn plan(
        &self,
        series: &HistoricalSeries,
        scenario: &ScenarioDefinition,
    ) -> Result<RunPlan, ProjectionError> {
        self.validate()?;
        if !scenario.multiplier.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: format!("scenarios.variations.{}", scenario.name),
                message: "multiplier must be finite".to_string(),
            }
            .into());
        }
        let insufficient = || DataError::InsufficientHistory {
            observations: series.len(),
            required: MIN_HISTORY,
        };
        if series.len() < MIN_HISTORY {
            return Err(insufficient().into());
        }
        let anchor = series.last_value().ok_or_else(insufficient)?;
        let trend = self.trend.estimate(series);

        Ok(RunPlan {
            anchor,
            trend,
            drift: trend * scenario.multiplier,
            volatility: self.volatility.resolve(series),
            seed: self.seed.unwrap_or_else(|| thread_rng().gen()),
        })
    }

    fn sample_paths(&self, plan: &RunPlan) -> Vec<SimulationPath> {
        let standard = Normal::standard();
        (0..self.num_paths)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(derive_path_seed(plan.seed, i as u64));
                let mut x = plan.anchor;
                let mut path = Vec::with_capacity(self.horizon_months);
                for _ in 0..self.horizon_months {
                    x += plan.drift + plan.volatility * standard.sample(&mut rng);
                    path.push(x);
                }
                path
            })
            .collect()
    }

    /// Collapse paths into per-step statistics. Aggregation runs across
    /// paths at a fixed step, never along a path.
    ///
    /// The reported band always contains the mean: a band narrower than the
    /// mean-median gap is widened to reach the mean.
    fn summarize(&self, paths: &[SimulationPath]) -> Vec<StepSummary> {
        let mut column = Vec::with_capacity(paths.len());
        (0..self.horizon_months)
            .map(|t| {
                column.clear();
                column.extend(paths.iter().map(|p| p[t]));
                let stats: RunningStats = column.iter().copied().collect();
                sort_floats(&mut column);
                let mean = stats.mean();
                StepSummary {
                    step: t + 1,
                    mean,
                    median: percentile_sorted(&column, 50.0),
                    std_dev: stats.population_std_dev(),
                    p10: percentile_sorted(&column, 10.0),
                    p25: percentile_sorted(&column, 25.0),
                    p75: percentile_sorted(&column, 75.0),
                    p90: percentile_sorted(&column, 90.0),
                    lower_bound: percentile_sorted(&column, self.lower_percentile).min(mean),
                    upper_bound: percentile_sorted(&column, self.upper_percentile).max(mean),
                }
            })
            .collect()
    }
}

impl Default for ScenarioProjector {
    fn default() -> Self {
        Self::new(12, DEFAULT_NUM_PATHS)
    }
}

/// Project with a fixed volatility; `seed = None` draws a fresh run seed.
pub fn project(
    series: &HistoricalSeries,
    scenario: &ScenarioDefinition,
    horizon_months: usize,
    num_paths: usize,
    volatility: f64,
    seed: Option<u64>,
) -> Result<ProjectionResult, ProjectionError> {
    let mut projector = ScenarioProjector::new(horizon_months, num_paths).with_volatility(volatility);
    if let Some(seed) = seed {
        projector = projector.with_seed(seed);
    }
    projector.project(series, scenario)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use opsim_core::types::SeriesKey;

    use super::*;

    fn series(values: &[f64]) -> HistoricalSeries {
        HistoricalSeries::monthly(
            SeriesKey::new("Plant Alpha", "quality_rate"),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            values,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_volatility_is_deterministic_line() {
        let result = project(
            &series(&[100.0, 102.0, 104.0]),
            &ScenarioDefinition::new("baseline", 1.0),
            3,
            10,
            0.0,
            Some(1),
        )
        .unwrap();
        let means = result.mean_trajectory();
        assert_eq!(means, [106.0, 108.0, 110.0]);
        for s in result.steps() {
            assert_eq!(s.lower_bound, s.mean);
            assert_eq!(s.upper_bound, s.mean);
            assert_eq!(s.std_dev, 0.0);
        }
    }

    #[test]
    fn test_paths_have_horizon_length() {
        let projector = ScenarioProjector::new(7, 25).with_seed(3);
        let paths = projector
            .simulate(&series(&[1.0, 2.0, 4.0, 3.0]), &ScenarioDefinition::new("b", 1.0))
            .unwrap();
        assert_eq!(paths.len(), 25);
        assert!(paths.iter().all(|p| p.len() == 7));
    }

    #[test]
    fn test_percentiles_ordered_per_step() {
        let result = ScenarioProjector::new(12, 300)
            .with_seed(11)
            .project(&series(&[50.0, 53.0, 49.0, 55.0, 52.0, 58.0]), &ScenarioDefinition::new("b", 1.0))
            .unwrap();
        for s in result.steps() {
            assert!(s.p10 <= s.p25 && s.p25 <= s.median && s.median <= s.p75 && s.p75 <= s.p90);
            assert_eq!(s.lower_bound, s.p10.min(s.mean));
            assert_eq!(s.upper_bound, s.p90.max(s.mean));
        }
    }

    #[test]
    fn test_custom_bounds() {
        let result = ScenarioProjector::new(2, 100)
            .with_seed(5)
            .with_bounds(25.0, 75.0)
            .project(&series(&[1.0, 3.0, 2.0]), &ScenarioDefinition::new("b", 1.0))
            .unwrap();
        let s = result.final_step().unwrap();
        assert_eq!(s.lower_bound, s.p25.min(s.mean));
        assert_eq!(s.upper_bound, s.p75.max(s.mean));
    }

    #[test]
    fn test_degenerate_band_widened_to_mean() {
        let result = ScenarioProjector::new(6, 200)
            .with_volatility(1.5)
            .with_seed(7)
            .with_bounds(50.0, 50.0)
            .project(&series(&[10.0, 12.0, 11.0, 13.0]), &ScenarioDefinition::new("b", 1.0))
            .unwrap();
        for s in result.steps() {
            assert!(s.lower_bound <= s.mean && s.mean <= s.upper_bound, "step {}", s.step);
            assert!(s.lower_bound <= s.median && s.median <= s.upper_bound);
        }
    }

    #[test]
    fn test_validation_fails_before_sampling() {
        let s = series(&[1.0, 2.0]);
        let scenario = ScenarioDefinition::new("b", 1.0);
        let err = ScenarioProjector::new(3, 10).with_bounds(90.0, 10.0).project(&s, &scenario);
        assert!(err.unwrap_err().is_config_error());

        let err = ScenarioProjector::new(3, 10)
            .project(&s, &ScenarioDefinition::new("nan", f64::NAN))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_single_observation_rejected() {
        let err = ScenarioProjector::new(3, 10)
            .project(&series(&[5.0]), &ScenarioDefinition::new("b", 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::Data(DataError::InsufficientHistory { observations: 1, required: 2 })
        );
    }

    #[test]
    fn test_unseeded_run_records_its_seed() {
        let s = series(&[10.0, 12.0, 11.0, 13.0]);
        let scenario = ScenarioDefinition::new("b", 1.0);
        let first = ScenarioProjector::new(4, 20).project(&s, &scenario).unwrap();
        let replay = ScenarioProjector::new(4, 20)
            .with_seed(first.seed())
            .project(&s, &scenario)
            .unwrap();
        assert_eq!(first, replay);
    }
}
