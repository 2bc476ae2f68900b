//! Request-handling errors.

use super::error_code::{self, IsoscopeErrorCode};
use super::ForestError;

/// Errors raised while turning a caller payload into a detection run.
/// Forest errors pass through with their own code.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Missing 'values' in request data")]
    MissingValues,

    #[error("'values' must contain at least one observation")]
    EmptyValues,

    #[error("Too many observations: {count} exceeds limit of {max}")]
    TooManyValues { count: usize, max: usize },

    #[error(transparent)]
    Forest(#[from] ForestError),
}

impl RequestError {
    /// Status code the request layer reports for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::Forest(ForestError::InvalidState(_)) => 500,
            Self::Forest(ForestError::Cancelled) => 503,
            _ => 400,
        }
    }
}

impl IsoscopeErrorCode for RequestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Forest(e) => e.error_code(),
            _ => error_code::INVALID_REQUEST,
        }
    }
}
