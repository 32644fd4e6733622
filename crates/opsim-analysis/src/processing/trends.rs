//! Month-over-month change per series.

use super::types::TrendRow;
use crate::dataset::MetricDataset;
use crate::stats::round_to;

/// One row per observation that has a predecessor in its series.
pub fn monthly_trends(dataset: &MetricDataset) -> Vec<TrendRow> {
    let mut rows = Vec::new();
    for (_, group) in dataset.groups() {
        for pair in group.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let abs_change = cur.value - prev.value;
            let mom_change =
                (prev.value != 0.0).then(|| round_to(abs_change / prev.value * 100.0, 2));
            rows.push(TrendRow {
                date: cur.date,
                facility: cur.facility.clone(),
                metric: cur.metric.clone(),
                value: cur.value,
                prev_value: prev.value,
                mom_change,
                mom_abs_change: round_to(abs_change, 2),
            });
        }
    }
    rows
}
