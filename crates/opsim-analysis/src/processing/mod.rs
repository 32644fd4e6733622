//! Descriptive statistics over a KPI dataset.
//!
//! Summary statistics, month-over-month trends, z-score anomalies, and
//! cross-metric correlations, all grouped by (facility, metric).

pub mod anomalies;
pub mod correlations;
pub mod summary;
pub mod trends;
pub mod types;

use serde::Serialize;

use opsim_core::config::ProcessingConfig;

pub use anomalies::detect_anomalies;
pub use correlations::{compute_correlations, strong_correlations};
pub use summary::summary_stats;
pub use trends::monthly_trends;
pub use types::{
    AnomalyRow, CorrelationRow, DeviationScore, SignificanceTier, SummaryRow, TrendRow,
};

use crate::dataset::MetricDataset;

/// All processing outputs for one dataset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingReport {
    pub summary: Vec<SummaryRow>,
    pub trends: Vec<TrendRow>,
    pub anomalies: Vec<AnomalyRow>,
    pub correlations: Vec<CorrelationRow>,
}

impl ProcessingReport {
    /// Correlations whose magnitude exceeds `threshold`.
    pub fn strong_correlations(&self, threshold: f64) -> Vec<&CorrelationRow> {
        strong_correlations(&self.correlations, threshold)
    }
}

/// Run every processing step with the configured thresholds.
pub fn run_full_processing(dataset: &MetricDataset, config: &ProcessingConfig) -> ProcessingReport {
    let _span = tracing::info_span!("processing", observations = dataset.len()).entered();

    let report = ProcessingReport {
        summary: summary_stats(dataset),
        trends: monthly_trends(dataset),
        anomalies: detect_anomalies(dataset, config.effective_z_threshold()),
        correlations: compute_correlations(dataset),
    };

    tracing::info!(
        summary_rows = report.summary.len(),
        trend_rows = report.trends.len(),
        anomaly_count = report.anomalies.len(),
        correlation_pairs = report.correlations.len(),
        "processing complete"
    );
    report
}
