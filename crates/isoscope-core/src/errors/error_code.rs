//! IsoscopeErrorCode trait for the request boundary.

/// Trait for converting Isoscope errors to structured error codes.
/// Every error enum implements this so the request layer can report a
/// stable code alongside the human-readable message.
pub trait IsoscopeErrorCode {
    /// Returns the error code string (e.g., "INVALID_PARAMETER").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the request boundary.
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const INVALID_STATE: &str = "INVALID_STATE";
pub const CANCELLED: &str = "CANCELLED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
