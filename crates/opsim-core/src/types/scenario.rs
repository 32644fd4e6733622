//! Scenario definitions and the read-only scenario table.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A named multiplier applied to the trend term of a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub multiplier: f64,
}

impl ScenarioDefinition {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }
}

impl fmt::Display for ScenarioDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{:.2})", self.name, self.multiplier)
    }
}

/// Immutable set of scenarios, loaded once and shared across every run.
///
/// Ordered by descending multiplier (most optimistic first), ties by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioTable {
    scenarios: Vec<ScenarioDefinition>,
}

impl ScenarioTable {
    /// Build a table, rejecting empty or duplicate names and non-finite multipliers.
    pub fn new(scenarios: impl IntoIterator<Item = ScenarioDefinition>) -> Result<Self, ConfigError> {
        let mut scenarios: Vec<ScenarioDefinition> = scenarios.into_iter().collect();
        if scenarios.is_empty() {
            return Err(ConfigError::validation(
                "scenarios.variations",
                "at least one scenario is required",
            ));
        }
        for s in &scenarios {
            if s.name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "scenarios.variations",
                    "scenario names must be non-empty",
                ));
            }
            if !s.multiplier.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: format!("scenarios.variations.{}", s.name),
                    message: "multiplier must be finite".to_string(),
                });
            }
        }
        scenarios.sort_by(|a, b| {
            b.multiplier
                .partial_cmp(&a.multiplier)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        for (i, s) in scenarios.iter().enumerate() {
            if scenarios[i + 1..].iter().any(|o| o.name == s.name) {
                return Err(ConfigError::validation(
                    "scenarios.variations",
                    format!("duplicate scenario name: {}", s.name),
                ));
            }
        }
        Ok(Self { scenarios })
    }

    /// Build from `(name, multiplier)` pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, ConfigError> {
        Self::new(pairs.into_iter().map(|(n, m)| ScenarioDefinition::new(n, m)))
    }

    /// Look up a scenario by name.
    pub fn get(&self, name: &str) -> Result<&ScenarioDefinition, ConfigError> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownScenario {
                name: name.to_string(),
            })
    }

    /// Position of a scenario in table order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.scenarios.iter().position(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.scenarios.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Highest-multiplier scenario.
    pub fn most_optimistic(&self) -> Option<&ScenarioDefinition> {
        self.scenarios.first()
    }

    /// Lowest-multiplier scenario.
    pub fn most_pessimistic(&self) -> Option<&ScenarioDefinition> {
        self.scenarios.last()
    }
}
