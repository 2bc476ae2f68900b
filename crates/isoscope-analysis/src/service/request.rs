//! Request payload parsing.

use isoscope_core::errors::RequestError;
use serde::Deserialize;

use crate::forest::Dataset;

/// One entry of `values`: a bare number or a numeric vector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObservationInput {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl ObservationInput {
    fn into_row(self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![v],
            Self::Vector(v) => v,
        }
    }
}

/// Body of an anomaly detection request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnomalyRequest {
    pub values: Option<Vec<ObservationInput>>,
    /// Per-request override of the configured contamination.
    #[serde(default)]
    pub contamination: Option<f64>,
    /// Per-request seed for reproducible answers.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AnomalyRequest {
    pub fn parse(body: &str) -> Result<Self, RequestError> {
        serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))
    }

    /// Validate presence and size, then reshape into a dataset.
    pub fn into_dataset(self, max_observations: usize) -> Result<Dataset, RequestError> {
        let values = self.values.ok_or(RequestError::MissingValues)?;
        if values.is_empty() {
            return Err(RequestError::EmptyValues);
        }
        if values.len() > max_observations {
            return Err(RequestError::TooManyValues {
                count: values.len(),
                max: max_observations,
            });
        }
        let rows = values.into_iter().map(ObservationInput::into_row).collect();
        Ok(Dataset::new(rows)?)
    }
}
