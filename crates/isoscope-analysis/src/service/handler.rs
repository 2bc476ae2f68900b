//! Anomaly detection request handler.

use isoscope_core::config::IsoscopeConfig;
use isoscope_core::errors::{ForestError, RequestError};

use super::request::AnomalyRequest;
use super::response::{AnomalyResponse, ErrorResponse, ServiceResponse};
use crate::forest::{AnomalyDetector, ForestParams};

/// Turns request bodies into detection runs using the loaded config.
#[derive(Debug, Clone, Default)]
pub struct AnomalyService {
    config: IsoscopeConfig,
}

impl AnomalyService {
    pub fn new(config: IsoscopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IsoscopeConfig {
        &self.config
    }

    /// Handle a raw JSON body. Never panics on caller input.
    pub fn handle(&self, body: &str) -> ServiceResponse {
        match AnomalyRequest::parse(body).and_then(|request| self.handle_request(request)) {
            Ok(response) => ServiceResponse::ok(&response),
            Err(err) => {
                let status = err.status();
                match &err {
                    RequestError::Forest(ForestError::InvalidState(_)) => {
                        tracing::error!(error = %err, "detection hit an internal invariant violation");
                    }
                    _ => tracing::warn!(status, error = %err, "rejected anomaly request"),
                }
                ServiceResponse::error(status, &ErrorResponse::from_error(&err))
            }
        }
    }

    /// Run detection for a parsed request.
    pub fn handle_request(&self, request: AnomalyRequest) -> Result<AnomalyResponse, RequestError> {
        let mut params = ForestParams::from(&self.config.forest);
        if let Some(contamination) = request.contamination {
            params.contamination = contamination;
        }
        if let Some(seed) = request.seed {
            params.seed = Some(seed);
        }

        let dataset = request.into_dataset(self.config.service.effective_max_observations())?;
        let detection = AnomalyDetector::new(params).detect(&dataset)?;

        Ok(AnomalyResponse {
            anomalies: detection.result.indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_is_400() {
        let response = AnomalyService::default().handle(r#"{"data": [1, 2]}"#);
        assert_eq!(response.status, 400);
        assert_eq!(response.body["code"], "INVALID_REQUEST");
        assert_eq!(response.body["error"], "Missing 'values' in request data");
    }

    #[test]
    fn test_bad_contamination_keeps_its_code() {
        let response =
            AnomalyService::default().handle(r#"{"values": [1, 2, 3], "contamination": 0.9}"#);
        assert_eq!(response.status, 400);
        assert_eq!(response.body["code"], "INVALID_PARAMETER");
    }

    #[test]
    fn test_success_body_shape() {
        let body = r#"{"values": [1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 50], "seed": 3}"#;
        let response = AnomalyService::default().handle(body);
        assert!(response.is_success());
        let anomalies = response.body["anomalies"].as_array().unwrap();
        assert!(anomalies.iter().any(|v| v.as_u64() == Some(19)));
    }
}
