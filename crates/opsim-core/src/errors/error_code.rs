//! OpsimErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a stable code string that
/// callers can match on when reporting per-combination failures.
pub trait OpsimErrorCode {
    /// Returns the error code string (e.g., "DATA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DATA_ERROR: &str = "DATA_ERROR";
pub const INSUFFICIENT_HISTORY: &str = "INSUFFICIENT_HISTORY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNKNOWN_SCENARIO: &str = "UNKNOWN_SCENARIO";
