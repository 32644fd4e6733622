//! Identifiers for (facility, metric) series.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one historical series: a metric observed at a facility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    pub facility: String,
    pub metric: String,
}

impl SeriesKey {
    pub fn new(facility: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            facility: facility.into(),
            metric: metric.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.facility, self.metric)
    }
}
