//! Error handling for opsim.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod projection_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::OpsimErrorCode;
pub use projection_error::ProjectionError;
