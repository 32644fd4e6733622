//! Flat rows, endpoint summaries, checkpoints, and scenario spreads.
//!
//! Reported values are rounded to 2 decimals; nothing here feeds back into
//! the simulation.

use serde::Serialize;

use crate::projection::{BatchOutcome, ProjectionResult};
use crate::stats::round_to;

/// One step of one projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub facility: String,
    pub metric: String,
    pub scenario: String,
    pub month: usize,
    pub p10: f64,
    pub median: f64,
    pub p90: f64,
    pub mean: f64,
}

/// Final-step view of one projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub facility: String,
    pub metric: String,
    pub scenario: String,
    pub projected_median: f64,
    pub projected_p10: f64,
    pub projected_p90: f64,
    /// `p90 - p10` at the final step.
    pub uncertainty_range: f64,
    pub projection_months: usize,
}

/// Projection state at one reporting horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonCheckpoint {
    pub facility: String,
    pub metric: String,
    pub scenario: String,
    pub horizon: usize,
    pub mean: f64,
    pub median: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Gap between the most and least optimistic scenario for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSpread {
    pub facility: String,
    pub metric: String,
    pub high_scenario: String,
    pub high_mean: f64,
    pub low_scenario: String,
    pub low_mean: f64,
    pub spread: f64,
}

/// Per-scenario averages across every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioAverage {
    pub scenario: String,
    pub mean_projected_median: f64,
    pub mean_uncertainty_range: f64,
    pub count: usize,
}

/// Every step of every projection, in outcome order.
pub fn flat_rows(outcome: &BatchOutcome) -> Vec<ScenarioRow> {
    outcome
        .results
        .iter()
        .flat_map(|r| {
            r.steps().iter().map(move |s| ScenarioRow {
                facility: r.facility().to_string(),
                metric: r.metric().to_string(),
                scenario: r.scenario().to_string(),
                month: s.step,
                p10: round_to(s.p10, 2),
                median: round_to(s.median, 2),
                p90: round_to(s.p90, 2),
                mean: round_to(s.mean, 2),
            })
        })
        .collect()
}

/// Final-step summary per projection.
pub fn endpoint_summary(outcome: &BatchOutcome) -> Vec<EndpointSummary> {
    outcome.results.iter().filter_map(endpoint).collect()
}

fn endpoint(result: &ProjectionResult) -> Option<EndpointSummary> {
    let last = result.final_step()?;
    Some(EndpointSummary {
        facility: result.facility().to_string(),
        metric: result.metric().to_string(),
        scenario: result.scenario().to_string(),
        projected_median: round_to(last.median, 2),
        projected_p10: round_to(last.p10, 2),
        projected_p90: round_to(last.p90, 2),
        uncertainty_range: round_to(last.p90 - last.p10, 2),
        projection_months: result.horizon(),
    })
}

/// Values at each requested horizon. Horizons past a projection's length
/// are skipped for that projection.
pub fn horizon_checkpoints(outcome: &BatchOutcome, horizons: &[usize]) -> Vec<HorizonCheckpoint> {
    let mut rows = Vec::new();
    for r in &outcome.results {
        for &h in horizons {
            let Some(s) = r.step(h) else { continue };
            rows.push(HorizonCheckpoint {
                facility: r.facility().to_string(),
                metric: r.metric().to_string(),
                scenario: r.scenario().to_string(),
                horizon: h,
                mean: round_to(s.mean, 2),
                median: round_to(s.median, 2),
                lower_bound: round_to(s.lower_bound, 2),
                upper_bound: round_to(s.upper_bound, 2),
            });
        }
    }
    rows
}

/// Highest- vs lowest-multiplier final mean per (facility, metric).
///
/// Series with a single projected scenario are skipped.
pub fn scenario_spread(outcome: &BatchOutcome) -> Vec<ScenarioSpread> {
    let by_multiplier =
        |a: &&ProjectionResult, b: &&ProjectionResult| a.multiplier().total_cmp(&b.multiplier());

    let mut rows = Vec::new();
    for group in outcome.results.chunk_by(|a, b| a.key() == b.key()) {
        if group.len() < 2 {
            continue;
        }
        let (Some(high), Some(low)) = (
            group.iter().max_by(by_multiplier),
            group.iter().min_by(by_multiplier),
        ) else {
            continue;
        };
        let (Some(h), Some(l)) = (high.final_step(), low.final_step()) else {
            continue;
        };
        rows.push(ScenarioSpread {
            facility: high.facility().to_string(),
            metric: high.metric().to_string(),
            high_scenario: high.scenario().to_string(),
            high_mean: round_to(h.mean, 2),
            low_scenario: low.scenario().to_string(),
            low_mean: round_to(l.mean, 2),
            spread: round_to(h.mean - l.mean, 2),
        });
    }
    rows
}

/// Average projected median and uncertainty range per scenario, in order
/// of first appearance.
pub fn scenario_means_by_name(summaries: &[EndpointSummary]) -> Vec<ScenarioAverage> {
    let mut acc: Vec<(String, f64, f64, usize)> = Vec::new();
    for s in summaries {
        match acc.iter_mut().find(|(name, ..)| *name == s.scenario) {
            Some((_, median, range, n)) => {
                *median += s.projected_median;
                *range += s.uncertainty_range;
                *n += 1;
            }
            None => acc.push((s.scenario.clone(), s.projected_median, s.uncertainty_range, 1)),
        }
    }
    acc.into_iter()
        .map(|(scenario, median, range, count)| ScenarioAverage {
            scenario,
            mean_projected_median: round_to(median / count as f64, 2),
            mean_uncertainty_range: round_to(range / count as f64, 2),
            count,
        })
        .collect()
}
