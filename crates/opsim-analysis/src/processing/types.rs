//! Row types produced by the processing statistics.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per (facility, metric, unit) descriptive statistics, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub facility: String,
    pub metric: String,
    pub unit: String,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single observation.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Month-over-month movement of one observation against its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub facility: String,
    pub metric: String,
    pub value: f64,
    pub prev_value: f64,
    /// Percent change; `None` when the previous value is zero.
    pub mom_change: Option<f64>,
    pub mom_abs_change: f64,
}

/// A point whose z-score against its group exceeds the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRow {
    pub date: NaiveDate,
    pub facility: String,
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub z_score: f64,
    pub deviation_score: DeviationScore,
    pub significance: SignificanceTier,
}

/// Pearson correlation between two metrics at one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub facility: String,
    pub metric_1: String,
    pub metric_2: String,
    pub correlation: f64,
    /// Dates both metrics were observed on.
    pub shared_points: usize,
}

/// Normalized deviation score in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationScore(f64);

impl DeviationScore {
    /// Create a new deviation score, clamped to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for DeviationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Significance tiers for flagged anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl SignificanceTier {
    /// Classify from a deviation score.
    pub fn from_deviation(score: f64) -> Self {
        if score >= 0.9 {
            Self::Critical
        } else if score >= 0.7 {
            Self::High
        } else if score >= 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for SignificanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
