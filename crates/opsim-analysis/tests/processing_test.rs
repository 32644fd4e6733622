//! Tests for processing statistics over generated and hand-built datasets.

use chrono::{Months, NaiveDate};

use opsim_analysis::dataset::{MetricDataset, Observation};
use opsim_analysis::generation::SampleGenerator;
use opsim_analysis::processing::{
    compute_correlations, detect_anomalies, monthly_trends, run_full_processing, summary_stats,
    SignificanceTier,
};
use opsim_core::config::ProcessingConfig;

fn obs(facility: &str, metric: &str, month: u32, value: f64) -> Observation {
    Observation {
        date: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_months(Months::new(month))
            .unwrap(),
        facility: facility.into(),
        metric: metric.into(),
        value,
        unit: "units".into(),
    }
}

fn generated() -> MetricDataset {
    SampleGenerator::new(vec!["Plant Alpha".into(), "Plant Beta".into()], 24)
        .with_seed(42)
        .with_end_month(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        .generate()
}

#[test]
fn test_summary_covers_every_group() {
    let ds = generated();
    let rows = summary_stats(&ds);
    assert_eq!(rows.len(), 2 * 10);
    for row in &rows {
        assert_eq!(row.count, 24);
        assert!(row.min <= row.mean && row.mean <= row.max);
        assert!(row.std_dev.unwrap() >= 0.0);
    }
}

#[test]
fn test_trends_skip_first_month() {
    let ds = generated();
    assert_eq!(monthly_trends(&ds).len(), 2 * 10 * 23);
}

#[test]
fn test_trend_values() {
    let ds: MetricDataset = [obs("A", "m", 0, 100.0), obs("A", "m", 1, 110.0)]
        .into_iter()
        .collect();
    let rows = monthly_trends(&ds);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].prev_value, 100.0);
    assert_eq!(rows[0].mom_abs_change, 10.0);
    assert_eq!(rows[0].mom_change, Some(10.0));
}

#[test]
fn test_anomalies_exceed_threshold() {
    let ds = generated();
    for row in detect_anomalies(&ds, 2.0) {
        assert!(row.z_score.abs() > 2.0);
        assert!((0.0..=1.0).contains(&row.deviation_score.value()));
    }
}

#[test]
fn test_higher_threshold_flags_fewer() {
    let ds = generated();
    assert!(detect_anomalies(&ds, 3.0).len() <= detect_anomalies(&ds, 2.0).len());
}

#[test]
fn test_spike_is_flagged_with_tier() {
    let mut rows: Vec<Observation> = (0..24).map(|i| obs("A", "m", i, 50.0 + (i % 2) as f64)).collect();
    rows.push(obs("A", "m", 24, 500.0));
    let ds = MetricDataset::new(rows);
    let anomalies = detect_anomalies(&ds, 2.0);
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].value, 500.0);
    assert!(anomalies[0].significance >= SignificanceTier::Moderate);
}

#[test]
fn test_correlations_within_unit_interval() {
    let ds = generated();
    let rows = compute_correlations(&ds);
    // 10 metrics -> 45 pairs per facility.
    assert_eq!(rows.len(), 2 * 45);
    assert!(rows.iter().all(|r| (-1.0..=1.0).contains(&r.correlation)));
    assert!(rows.iter().all(|r| r.shared_points == 24));
}

#[test]
fn test_full_processing_report() {
    let ds = generated();
    let report = run_full_processing(&ds, &ProcessingConfig::default());
    assert_eq!(report.summary.len(), 20);
    assert_eq!(report.trends.len(), 2 * 10 * 23);
    assert_eq!(report.correlations.len(), 90);
    assert!(report
        .strong_correlations(0.5)
        .iter()
        .all(|r| r.correlation.abs() > 0.5));
}
