//! Per-series descriptive statistics.

use statrs::statistics::Statistics;

use super::types::SummaryRow;
use crate::dataset::MetricDataset;
use crate::stats::round_to;

/// Mean, sample std, min, max, and count per (facility, metric, unit).
pub fn summary_stats(dataset: &MetricDataset) -> Vec<SummaryRow> {
    dataset
        .groups()
        .into_iter()
        .filter(|(_, group)| !group.is_empty())
        .map(|(key, group)| {
            let values: Vec<f64> = group.iter().map(|o| o.value).collect();
            let std_dev = if values.len() > 1 {
                Some(round_to(values.iter().std_dev(), 2))
            } else {
                None
            };
            SummaryRow {
                unit: group[0].unit.clone(),
                mean: round_to(values.iter().mean(), 2),
                std_dev,
                min: round_to(values.iter().copied().fold(f64::INFINITY, f64::min), 2),
                max: round_to(values.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2),
                count: values.len(),
                facility: key.facility,
                metric: key.metric,
            }
        })
        .collect()
}
