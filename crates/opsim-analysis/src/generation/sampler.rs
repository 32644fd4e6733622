//! Seeded sample generator.

use std::f64::consts::PI;

use chrono::{Datelike, Months, NaiveDate, Utc};
use rand::prelude::*;
use statrs::distribution::Normal;

use opsim_core::config::DataConfig;

use super::profiles::{facility_profile, METRIC_PROFILES};
use crate::dataset::{MetricDataset, Observation};
use crate::stats::round_to;

/// Generates a long-format KPI dataset: facilities x metrics x months.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    num_months: usize,
    facilities: Vec<String>,
    seed: u64,
    anomaly_rate: f64,
    end_month: NaiveDate,
}

impl SampleGenerator {
    pub fn new(facilities: Vec<String>, num_months: usize) -> Self {
        Self {
            num_months,
            facilities,
            seed: 42,
            anomaly_rate: 0.03,
            end_month: current_month_start(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.effective_facility_names(), config.effective_num_months())
            .with_seed(config.effective_seed())
            .with_anomaly_rate(config.effective_anomaly_rate())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_anomaly_rate(mut self, rate: f64) -> Self {
        self.anomaly_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Pin the last generated month; any day within it is normalized to the 1st.
    pub fn with_end_month(mut self, month: NaiveDate) -> Self {
        self.end_month = month.with_day(1).unwrap_or(month);
        self
    }

    /// First-of-month dates, oldest first, ending at `end_month`.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.num_months)
            .rev()
            .filter_map(|back| self.end_month.checked_sub_months(Months::new(back as u32)))
            .collect()
    }

    pub fn generate(&self) -> MetricDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let standard = Normal::standard();
        let dates = self.dates();
        let mut observations =
            Vec::with_capacity(self.facilities.len() * METRIC_PROFILES.len() * dates.len());

        for facility in &self.facilities {
            let profile = facility_profile(facility);

            for metric in &METRIC_PROFILES {
                for (i, &date) in dates.iter().enumerate() {
                    let i = i as f64;
                    let trend = metric.monthly_trend * i;
                    let seasonal = (2.0 * PI * i / 12.0).sin() * metric.std_dev * 0.3;
                    let mut noise = standard.sample(&mut rng) * metric.std_dev * profile.volatility;

                    if rng.gen::<f64>() < self.anomaly_rate {
                        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                        noise += sign * metric.std_dev * 3.0;
                    }

                    let raw = (metric.base + trend + seasonal + noise) * profile.multiplier;
                    observations.push(Observation {
                        date,
                        facility: facility.clone(),
                        metric: metric.name.to_string(),
                        value: round_to(metric.clamp(raw), 2),
                        unit: metric.unit.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            observation_count = observations.len(),
            facilities = self.facilities.len(),
            months = dates.len(),
            seed = self.seed,
            "generated sample dataset"
        );
        MetricDataset::new(observations)
    }
}

fn current_month_start() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.with_day(1).unwrap_or(today)
}
