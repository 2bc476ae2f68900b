//! Response payloads.

use isoscope_core::errors::{error_code, IsoscopeErrorCode};
use serde::{Deserialize, Serialize};

/// Successful detection: flagged indices, ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub anomalies: Vec<usize>,
}

/// Failed request: message plus stable error code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn from_error<E: IsoscopeErrorCode + std::fmt::Display>(err: &E) -> Self {
        Self {
            error: err.to_string(),
            code: err.error_code().to_string(),
        }
    }
}

/// Status plus JSON body, ready for any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ServiceResponse {
    pub fn ok(response: &AnomalyResponse) -> Self {
        Self::with_payload(200, response)
    }

    pub fn error(status: u16, response: &ErrorResponse) -> Self {
        Self::with_payload(status, response)
    }

    /// Body is the serde form of `payload`; a payload that fails to
    /// serialize becomes a 500.
    fn with_payload<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response body");
                Self {
                    status: 500,
                    body: serde_json::json!({
                        "error": e.to_string(),
                        "code": error_code::INVALID_STATE,
                    }),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_string(&self) -> String {
        self.body.to_string()
    }
}
