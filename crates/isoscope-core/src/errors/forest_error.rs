//! Isolation forest errors.

use super::error_code::{self, IsoscopeErrorCode};

/// Errors raised while fitting, scoring, or classifying.
///
/// `InvalidParameter` is caller-facing and never retried.
/// `InvalidState` marks a broken construction invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForestError {
    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ForestError {
    /// Shorthand for an `InvalidParameter` on `field`.
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for errors the caller caused and can fix.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

impl IsoscopeErrorCode for ForestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
            Self::InvalidState(_) => error_code::INVALID_STATE,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
