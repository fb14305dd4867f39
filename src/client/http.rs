//! reqwest-backed prediction and email client.
//!
//! One request per call: no retry, no cancellation, and no timeout unless
//! the endpoint config sets one.

use super::{ClientError, ClientResult, EmailRequest, EmailResponse, PredictionResult, PredictionService};
use crate::config::EndpointConfig;
use crate::form::TransportPayload;
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

pub struct HttpPredictionClient {
    client: Client,
    predict_url: Url,
    email_url: Url,
}

impl HttpPredictionClient {
    pub fn new(config: &EndpointConfig) -> ClientResult<Self> {
        let base = Url::parse(&config.base_url)?;
        let predict_url = base.join(&config.predict_path)?;
        let email_url = base.join(&config.email_path)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            predict_url,
            email_url,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    pub fn email_url(&self) -> &Url {
        &self.email_url
    }
}

async fn body_text(response: Response, target: &str) -> ClientResult<String> {
    response
        .text()
        .await
        .map_err(|e| ClientError::from_transport(e, target))
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    #[instrument(skip(self, payload), fields(url = %self.predict_url, fields = payload.len()))]
    async fn predict(&self, payload: &TransportPayload) -> ClientResult<PredictionResult> {
        let target = self.predict_url.as_str();
        let response = self
            .client
            .post(self.predict_url.clone())
            .form(payload.pairs())
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, target))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Prediction endpoint returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = body_text(response, target).await?;
        let result: PredictionResult =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(
            prediction = result.prediction,
            probability = result.probability,
            server_factors = result.contributing_factors.is_some(),
            server_recommendations = result.recommendations.is_some(),
            "Prediction received"
        );
        Ok(result)
    }

    #[instrument(skip(self, request), fields(url = %self.email_url, attachment_len = request.pdf_attachment.len()))]
    async fn send_email(&self, request: &EmailRequest) -> ClientResult<EmailResponse> {
        let target = self.email_url.as_str();
        let form = multipart::Form::new()
            .text("doctorEmail", request.doctor_email.clone())
            .text("message", request.message.clone())
            .text("predictionResult", request.prediction_result.clone())
            .text("probability", request.probability.clone())
            .text("patientid", request.patient_id.clone())
            .text("pdfAttachment", request.pdf_attachment.clone());

        let response = self
            .client
            .post(self.email_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, target))?;

        // The service answers failures with a JSON body too, so the body is
        // decoded before the status is considered.
        let status = response.status();
        let text = body_text(response, target).await?;
        match serde_json::from_str::<EmailResponse>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }
}
