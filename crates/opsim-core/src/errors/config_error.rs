//! Configuration errors.

use super::error_code::{self, OpsimErrorCode};

/// Errors that can occur during configuration loading and parameter validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unknown scenario: {name}")]
    UnknownScenario { name: String },
}

impl ConfigError {
    /// Shorthand for a `ValidationFailed` error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl OpsimErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownScenario { .. } => error_code::UNKNOWN_SCENARIO,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
