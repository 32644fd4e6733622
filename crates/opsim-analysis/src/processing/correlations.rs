//! Cross-metric Pearson correlations per facility.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use super::types::CorrelationRow;
use crate::dataset::MetricDataset;
use crate::stats::{pearson, round_to};

/// Minimum shared dates before a correlation is reported.
pub const MIN_SHARED_POINTS: usize = 3;

/// Pearson r for every metric pair at each facility, over dates present in both.
///
/// Metrics are paired in name order (`metric_1 < metric_2`). Pairs with too
/// few shared dates or zero variance are omitted.
pub fn compute_correlations(dataset: &MetricDataset) -> Vec<CorrelationRow> {
    let mut rows = Vec::new();

    for facility in dataset.facilities() {
        let mut by_metric: FxHashMap<&str, FxHashMap<NaiveDate, f64>> = FxHashMap::default();
        for obs in dataset.observations().iter().filter(|o| o.facility == facility) {
            by_metric
                .entry(obs.metric.as_str())
                .or_default()
                .insert(obs.date, obs.value);
        }

        let mut metrics: Vec<&str> = by_metric.keys().copied().collect();
        metrics.sort_unstable();

        for (i, m1) in metrics.iter().enumerate() {
            for m2 in &metrics[i + 1..] {
                let (a, b) = (&by_metric[m1], &by_metric[m2]);
                let mut dates: Vec<NaiveDate> =
                    a.keys().filter(|d| b.contains_key(d)).copied().collect();
                if dates.len() < MIN_SHARED_POINTS {
                    continue;
                }
                dates.sort_unstable();
                let xs: Vec<f64> = dates.iter().map(|d| a[d]).collect();
                let ys: Vec<f64> = dates.iter().map(|d| b[d]).collect();
                if let Some(r) = pearson(&xs, &ys) {
                    rows.push(CorrelationRow {
                        facility: facility.to_string(),
                        metric_1: m1.to_string(),
                        metric_2: m2.to_string(),
                        correlation: round_to(r, 3),
                        shared_points: dates.len(),
                    });
                }
            }
        }
    }
    rows
}

/// Rows with |r| strictly above `threshold`.
pub fn strong_correlations(rows: &[CorrelationRow], threshold: f64) -> Vec<&CorrelationRow> {
    rows.iter()
        .filter(|r| r.correlation.abs() > threshold)
        .collect()
}
