use chrono::NaiveDate;
use proptest::prelude::*;

use opsim_analysis::projection::project;
use opsim_core::types::{HistoricalSeries, ScenarioDefinition, SeriesKey};

fn series(values: &[f64]) -> HistoricalSeries {
    HistoricalSeries::monthly(
        SeriesKey::new("Plant Alpha", "quality_rate"),
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        values,
    )
    .unwrap()
}

fn history() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0f64..1_000.0, 2..36)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_seed_reproduces(
        values in history(),
        horizon in 1usize..24,
        paths in 1usize..64,
        volatility in 0.0f64..50.0,
        seed in any::<u64>(),
    ) {
        let s = series(&values);
        let scenario = ScenarioDefinition::new("baseline", 1.0);
        let a = project(&s, &scenario, horizon, paths, volatility, Some(seed)).unwrap();
        let b = project(&s, &scenario, horizon, paths, volatility, Some(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn band_contains_mean(
        values in history(),
        horizon in 1usize..18,
        volatility in 0.0f64..20.0,
        seed in any::<u64>(),
    ) {
        let s = series(&values);
        let scenario = ScenarioDefinition::new("baseline", 1.0);
        let result = project(&s, &scenario, horizon, 200, volatility, Some(seed)).unwrap();
        for step in result.steps() {
            let slack = 1e-9 * (1.0 + step.mean.abs());
            prop_assert!(step.lower_bound <= step.mean + slack, "{:?}", step);
            prop_assert!(step.mean <= step.upper_bound + slack, "{:?}", step);
        }
    }

    #[test]
    fn horizon_length_is_exact(
        values in history(),
        horizon in 1usize..60,
        seed in any::<u64>(),
    ) {
        let s = series(&values);
        let scenario = ScenarioDefinition::new("baseline", 1.0);
        let result = project(&s, &scenario, horizon, 8, 1.0, Some(seed)).unwrap();
        prop_assert_eq!(result.steps().len(), horizon);
        prop_assert_eq!(result.horizon(), horizon);
    }

    #[test]
    fn optimistic_ends_above_pessimistic(
        start in -500.0f64..500.0,
        slope in 0.1f64..10.0,
        len in 2usize..24,
        horizon in 1usize..24,
        volatility in 0.0f64..20.0,
        seed in any::<u64>(),
    ) {
        let values: Vec<f64> = (0..len).map(|i| start + slope * i as f64).collect();
        let s = series(&values);
        let up = ScenarioDefinition::new("optimistic", 1.15);
        let down = ScenarioDefinition::new("pessimistic", -0.5);
        let hi = project(&s, &up, horizon, 50, volatility, Some(seed)).unwrap();
        let lo = project(&s, &down, horizon, 50, volatility, Some(seed)).unwrap();
        prop_assert!(hi.final_step().unwrap().mean >= lo.final_step().unwrap().mean);
    }
}
