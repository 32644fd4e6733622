//! Tests for the batch scenario runner.

use std::sync::Arc;

use chrono::{Months, NaiveDate};

use opsim_analysis::dataset::{MetricDataset, Observation};
use opsim_analysis::generation::SampleGenerator;
use opsim_analysis::projection::{
    derive_run_seed, BatchRequest, ProjectionSettings, ScenarioEngine, ScenarioProjector,
};
use opsim_core::config::OpsimConfig;
use opsim_core::errors::{ConfigError, DataError, ProjectionError};
use opsim_core::types::{ScenarioTable, SeriesKey};

fn table() -> Arc<ScenarioTable> {
    Arc::new(
        ScenarioTable::from_pairs([
            ("optimistic", 1.15),
            ("baseline", 1.0),
            ("pessimistic", 0.85),
            ("worst_case", 0.70),
        ])
        .unwrap(),
    )
}

fn settings() -> ProjectionSettings {
    ProjectionSettings {
        horizon_months: 6,
        num_paths: 50,
        ..ProjectionSettings::default()
    }
    .with_seed(2024)
}

fn sample() -> MetricDataset {
    SampleGenerator::new(vec!["Plant Alpha".into(), "Plant Beta".into()], 12)
        .with_seed(42)
        .with_end_month(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        .generate()
}

fn obs(facility: &str, metric: &str, month: u32, value: f64) -> Observation {
    Observation {
        date: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_months(Months::new(month))
            .unwrap(),
        facility: facility.into(),
        metric: metric.into(),
        value,
        unit: "%".into(),
    }
}

#[test]
fn test_full_cross_product() {
    let engine = ScenarioEngine::new(table(), settings());
    let outcome = engine.run(&sample()).unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.results.len(), 2 * 10 * 4);
    assert_eq!(outcome.global_seed, 2024);
    assert!(outcome.results.iter().all(|r| r.horizon() == 6 && r.num_paths() == 50));
}

#[test]
fn test_result_order_is_dataset_then_table() {
    let dataset = sample();
    let outcome = ScenarioEngine::new(table(), settings()).run(&dataset).unwrap();

    let first: Vec<&str> = outcome.results[..4].iter().map(|r| r.scenario()).collect();
    assert_eq!(first, ["optimistic", "baseline", "pessimistic", "worst_case"]);
    assert_eq!(outcome.results[0].facility(), dataset.facilities()[0]);
    assert_eq!(outcome.results[0].metric(), dataset.metrics()[0]);
    assert_eq!(outcome.results.last().unwrap().facility(), "Plant Beta");
}

#[test]
fn test_batch_reproducible() {
    let dataset = sample();
    let engine = ScenarioEngine::new(table(), settings());
    assert_eq!(engine.run(&dataset).unwrap(), engine.run(&dataset).unwrap());
}

#[test]
fn test_thread_count_does_not_change_results() {
    let dataset = sample();
    let engine = ScenarioEngine::new(table(), settings());
    let parallel = engine.run(&dataset).unwrap();
    let serial = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| engine.run(&dataset).unwrap());
    assert_eq!(parallel, serial);
}

#[test]
fn test_combination_seed_independent_of_other_runs() {
    let dataset = sample();
    let engine = ScenarioEngine::new(table(), settings());
    let full = engine.run(&dataset).unwrap();
    let narrow = engine
        .run_request(
            &dataset,
            &BatchRequest::all()
                .with_facilities(["Plant Beta"])
                .with_metrics(["quality_rate"])
                .with_scenarios(["pessimistic"]),
        )
        .unwrap();

    assert_eq!(narrow.results.len(), 1);
    assert_eq!(
        Some(&narrow.results[0]),
        full.get("Plant Beta", "quality_rate", "pessimistic")
    );
}

#[test]
fn test_batch_matches_direct_projection() {
    let dataset = sample();
    let engine = ScenarioEngine::new(table(), settings());
    let outcome = engine.run(&dataset).unwrap();

    let key = SeriesKey::new("Plant Alpha", "equipment_uptime");
    let scenario = table().get("baseline").unwrap().clone();
    let run_seed = derive_run_seed(2024, &key, "baseline");
    let direct = settings()
        .projector(run_seed)
        .project(&dataset.series("Plant Alpha", "equipment_uptime").unwrap(), &scenario)
        .unwrap();

    assert_eq!(Some(&direct), outcome.get("Plant Alpha", "equipment_uptime", "baseline"));
    assert_eq!(direct.seed(), run_seed);
}

#[test]
fn test_short_series_recorded_as_failure() {
    let dataset: MetricDataset = [
        obs("A", "quality_rate", 0, 95.0),
        obs("A", "quality_rate", 1, 96.0),
        obs("A", "quality_rate", 2, 96.5),
        obs("A", "uptime", 0, 90.0),
    ]
    .into_iter()
    .collect();

    let outcome = ScenarioEngine::new(table(), settings()).run(&dataset).unwrap();

    assert!(!outcome.is_clean());
    assert_eq!(outcome.results.len(), 4);
    assert_eq!(outcome.failure_count(), 4);
    for failure in &outcome.failures {
        assert_eq!(failure.key, SeriesKey::new("A", "uptime"));
        assert_eq!(
            failure.error,
            ProjectionError::Data(DataError::InsufficientHistory { observations: 1, required: 2 })
        );
    }
}

#[test]
fn test_failure_serializes_with_code() {
    let dataset: MetricDataset = [obs("A", "m", 0, 1.0)].into_iter().collect();
    let outcome = ScenarioEngine::new(table(), settings()).run(&dataset).unwrap();
    let json = serde_json::to_value(&outcome.failures[0]).unwrap();
    assert_eq!(json["facility"], "A");
    assert_eq!(json["code"], "INSUFFICIENT_HISTORY");
}

#[test]
fn test_unknown_scenario_rejects_request() {
    let engine = ScenarioEngine::new(table(), settings());
    let err = engine
        .run_request(&sample(), &BatchRequest::all().with_scenarios(["baseline", "moonshot"]))
        .unwrap_err();
    assert_eq!(
        err,
        ProjectionError::Config(ConfigError::UnknownScenario { name: "moonshot".into() })
    );
}

#[test]
fn test_empty_dataset_rejected() {
    let engine = ScenarioEngine::new(table(), settings());
    let err = engine.run(&MetricDataset::default()).unwrap_err();
    assert_eq!(err, ProjectionError::Data(DataError::EmptyDataset));
}

#[test]
fn test_invalid_settings_reject_batch() {
    let bad = ProjectionSettings {
        horizon_months: 0,
        ..settings()
    };
    let err = ScenarioEngine::new(table(), bad).run(&sample()).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_engine_from_config() {
    let config = OpsimConfig::from_toml(
        r#"
[scenarios]
num_simulations = 30
time_horizons = [2, 4]
seed = 5

[scenarios.variations]
up = 1.2
down = 0.8
"#,
    )
    .unwrap();
    let engine = ScenarioEngine::from_config(&config).unwrap();
    assert_eq!(engine.settings().horizon_months, 4);
    assert_eq!(engine.settings().num_paths, 30);
    assert_eq!(engine.scenarios().len(), 2);

    let outcome = engine.run(&sample()).unwrap();
    assert_eq!(outcome.global_seed, 5);
    assert_eq!(outcome.results.len(), 2 * 10 * 2);
}

#[test]
fn test_unseeded_batch_replays_from_recorded_seed() {
    let dataset = sample();
    let unseeded = ProjectionSettings {
        seed: None,
        ..settings()
    };
    let first = ScenarioEngine::new(table(), unseeded).run(&dataset).unwrap();
    let replay = ScenarioEngine::new(table(), unseeded.with_seed(first.global_seed))
        .run(&dataset)
        .unwrap();
    assert_eq!(first, replay);
}

#[test]
fn test_projector_settings_carry_bounds() {
    let s = ProjectionSettings {
        lower_percentile: 5.0,
        upper_percentile: 95.0,
        ..settings()
    };
    let projector: ScenarioProjector = s.projector(1);
    assert_eq!(projector.seed(), Some(1));
    assert_eq!(projector.horizon_months(), 6);
}
