//! Long-format KPI observations and their grouping into historical series.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use opsim_core::errors::DataError;
use opsim_core::types::{HistoricalSeries, SeriesKey, SeriesPoint};

/// One KPI reading: a metric value at a facility for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub facility: String,
    pub metric: String,
    pub value: f64,
    pub unit: String,
}

/// A table of observations across facilities and metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDataset {
    observations: Vec<Observation>,
}

impl MetricDataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct facilities in first-appearance order.
    pub fn facilities(&self) -> Vec<&str> {
        distinct(self.observations.iter().map(|o| o.facility.as_str()))
    }

    /// Distinct metrics in first-appearance order.
    pub fn metrics(&self) -> Vec<&str> {
        distinct(self.observations.iter().map(|o| o.metric.as_str()))
    }

    /// Unit of the first observation of `metric`.
    pub fn unit_of(&self, metric: &str) -> Option<&str> {
        self.observations
            .iter()
            .find(|o| o.metric == metric)
            .map(|o| o.unit.as_str())
    }

    /// The date-sorted series for one (facility, metric).
    ///
    /// A pair with no observations yields an empty series; duplicate dates
    /// are rejected as `NonIncreasingTimestamps`.
    pub fn series(&self, facility: &str, metric: &str) -> Result<HistoricalSeries, DataError> {
        let mut points: Vec<SeriesPoint> = self
            .observations
            .iter()
            .filter(|o| o.facility == facility && o.metric == metric)
            .map(|o| SeriesPoint {
                date: o.date,
                value: o.value,
            })
            .collect();
        points.sort_by_key(|p| p.date);
        HistoricalSeries::new(SeriesKey::new(facility, metric), points)
    }

    /// Observations grouped by (facility, metric), each group date-sorted.
    /// Groups come out in first-appearance order.
    pub fn groups(&self) -> Vec<(SeriesKey, Vec<&Observation>)> {
        let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
        let mut groups: Vec<(SeriesKey, Vec<&Observation>)> = Vec::new();
        for obs in &self.observations {
            let slot = *index
                .entry((obs.facility.as_str(), obs.metric.as_str()))
                .or_insert_with(|| {
                    groups.push((SeriesKey::new(&obs.facility, &obs.metric), Vec::new()));
                    groups.len() - 1
                });
            groups[slot].1.push(obs);
        }
        for (_, group) in &mut groups {
            group.sort_by_key(|o| o.date);
        }
        groups
    }
}

impl FromIterator<Observation> for MetricDataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = FxHashSet::default();
    items.filter(|s| seen.insert(*s)).collect()
}
