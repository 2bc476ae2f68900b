//! Error handling for Isoscope.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod forest_error;
pub mod request_error;

pub use config_error::ConfigError;
pub use error_code::IsoscopeErrorCode;
pub use forest_error::ForestError;
pub use request_error::RequestError;
