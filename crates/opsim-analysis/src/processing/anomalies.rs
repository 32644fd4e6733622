//! Z-score anomaly flagging against each series' own mean and std.

use statrs::statistics::Statistics;

use super::types::{AnomalyRow, DeviationScore, SignificanceTier};
use crate::dataset::MetricDataset;
use crate::stats::round_to;

/// Flag every point with |z| > `z_threshold` within its (facility, metric) group.
///
/// Uses the sample standard deviation. Groups with fewer than two points or
/// zero spread cannot produce anomalies.
pub fn detect_anomalies(dataset: &MetricDataset, z_threshold: f64) -> Vec<AnomalyRow> {
    let mut anomalies = Vec::new();

    for (key, group) in dataset.groups() {
        if group.len() < 2 {
            continue;
        }
        let values: Vec<f64> = group.iter().map(|o| o.value).collect();
        let mean = values.iter().mean();
        let stddev = values.iter().std_dev();
        if !stddev.is_finite() || stddev <= 0.0 {
            continue;
        }

        for obs in group {
            let z = (obs.value - mean) / stddev;
            if z.abs() > z_threshold {
                let deviation = normalize_zscore(z.abs(), z_threshold);
                anomalies.push(AnomalyRow {
                    date: obs.date,
                    facility: key.facility.clone(),
                    metric: key.metric.clone(),
                    value: obs.value,
                    unit: obs.unit.clone(),
                    z_score: round_to(z, 2),
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                });
            }
        }
    }

    tracing::debug!(anomaly_count = anomalies.len(), z_threshold, "anomaly scan complete");
    anomalies
}

/// Map |z| from [threshold, 3 * threshold] onto [0.0, 1.0].
fn normalize_zscore(abs_z: f64, threshold: f64) -> DeviationScore {
    if abs_z <= threshold {
        return DeviationScore::zero();
    }
    let max_z = threshold * 3.0;
    DeviationScore::new((abs_z - threshold) / (max_z - threshold))
}
