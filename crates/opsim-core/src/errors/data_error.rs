//! Input data errors.

use super::error_code::{self, OpsimErrorCode};

/// Errors raised when historical input is insufficient or malformed.
/// Never retried internally; the caller must supply valid history.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("insufficient history: {observations} observation(s), need at least {required}")]
    InsufficientHistory { observations: usize, required: usize },

    #[error("timestamps must be strictly increasing (violated at index {index})")]
    NonIncreasingTimestamps { index: usize },

    #[error("non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    #[error("dataset contains no observations")]
    EmptyDataset,
}

impl OpsimErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientHistory { .. } => error_code::INSUFFICIENT_HISTORY,
            _ => error_code::DATA_ERROR,
        }
    }
}
