//! End-to-end pipeline tests.

use opsim_analysis::pipeline::run_pipeline;
use opsim_core::config::OpsimConfig;

fn small_config() -> OpsimConfig {
    OpsimConfig::from_toml(
        r#"
[data]
num_months = 12
facility_names = ["Plant Alpha", "Plant Beta"]
seed = 42

[scenarios]
num_simulations = 25
time_horizons = [3, 6]
seed = 7
"#,
    )
    .unwrap()
}

#[test]
fn test_pipeline_produces_every_stage() {
    let report = run_pipeline(&small_config()).unwrap();

    assert_eq!(report.dataset.len(), 2 * 10 * 12);
    assert_eq!(report.processing.summary.len(), 20);
    assert!(report.outcome.is_clean());
    assert_eq!(report.outcome.results.len(), 2 * 10 * 4);
    assert_eq!(report.endpoints.len(), report.outcome.results.len());
    assert!(report.endpoints.iter().all(|e| e.projection_months == 6));
    assert_eq!(report.scenario_averages.len(), 4);
    assert_eq!(report.scenario_averages[0].scenario, "optimistic");
}

#[test]
fn test_pipeline_projections_reproducible() {
    let a = run_pipeline(&small_config()).unwrap();
    let b = run_pipeline(&small_config()).unwrap();
    assert_eq!(a.dataset, b.dataset);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn test_invalid_scenario_config_fails() {
    let mut config = small_config();
    config.scenarios.variations.insert("broken".into(), f64::NAN);
    assert!(run_pipeline(&config).unwrap_err().is_config_error());
}

#[test]
fn test_report_serializes() {
    let report = run_pipeline(&small_config()).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"scenario_averages\""));
}
