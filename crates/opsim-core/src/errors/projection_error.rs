//! Projection errors: the union of everything a single projection can reject.

use super::error_code::OpsimErrorCode;
use super::{ConfigError, DataError};

/// Errors that can occur while projecting one (facility, metric, scenario)
/// combination. Raised before any sampling starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ProjectionError {
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl OpsimErrorCode for ProjectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
