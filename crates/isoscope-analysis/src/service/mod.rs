//! Request handling in front of the detector.
//!
//! Accepts `{"values": [...]}` bodies, runs detection, and answers with
//! `{"anomalies": [...]}` or a coded error. Transport is left to the caller.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::AnomalyService;
pub use request::{AnomalyRequest, ObservationInput};
pub use response::{AnomalyResponse, ErrorResponse, ServiceResponse};
