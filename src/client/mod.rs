//! Remote prediction service: the `/predict` and `/send-email` endpoints.

pub mod errors;
pub mod http;
pub mod models;

pub use errors::{ClientError, ClientResult};
pub use http::HttpPredictionClient;
pub use models::{EmailRequest, EmailResponse, PredictionResult};

use crate::form::TransportPayload;
use async_trait::async_trait;

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, payload: &TransportPayload) -> ClientResult<PredictionResult>;

    async fn send_email(&self, request: &EmailRequest) -> ClientResult<EmailResponse>;
}
