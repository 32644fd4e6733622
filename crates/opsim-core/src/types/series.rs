//! Historical series: ordered (date, value) observations for one series key.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::SeriesKey;
use crate::errors::DataError;

/// One observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered observations for a single (facility, metric) pair.
///
/// Invariants, enforced at construction: dates strictly increasing and
/// every value finite. Length is unconstrained here; consumers that need a
/// minimum history check it themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    key: SeriesKey,
    points: Vec<SeriesPoint>,
}

impl HistoricalSeries {
    pub fn new(key: SeriesKey, points: Vec<SeriesPoint>) -> Result<Self, DataError> {
        for (index, point) in points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(DataError::NonFiniteValue { index });
            }
            if index > 0 && points[index - 1].date >= point.date {
                return Err(DataError::NonIncreasingTimestamps { index });
            }
        }
        Ok(Self { key, points })
    }

    /// Build a monthly series starting at `start`, one value per month.
    pub fn monthly(key: SeriesKey, start: NaiveDate, values: &[f64]) -> Result<Self, DataError> {
        let mut points = Vec::with_capacity(values.len());
        for (i, &value) in values.iter().enumerate() {
            let date = start
                .checked_add_months(Months::new(i as u32))
                .ok_or(DataError::NonIncreasingTimestamps { index: i })?;
            points.push(SeriesPoint { date, value });
        }
        Self::new(key, points)
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Sample standard deviation (n - 1 denominator). `None` below two points.
    pub fn sample_std_dev(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        let sd = self.values().std_dev();
        sd.is_finite().then_some(sd)
    }

    /// Mean of the observed values. `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.values().mean())
    }
}
