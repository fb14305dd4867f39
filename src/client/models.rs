use crate::risk::{ContributingFactor, Recommendations};
use serde::{Deserialize, Serialize};

/// Body of a `/predict` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub prediction: u8,
    pub probability: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub contributing_factors: Option<Vec<ContributingFactor>>,
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
    #[serde(default)]
    pub message: Option<String>,
    /// Set by the service when it answered through its fallback path.
    #[serde(default)]
    pub note: Option<String>,
}

impl PredictionResult {
    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }

    /// Banner text: the server's message, or the same wording derived
    /// from the binary prediction.
    pub fn message(&self) -> String {
        match self.message.as_deref() {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ if self.is_positive() => "High risk of heart disease".to_string(),
            _ => "Low risk of heart disease".to_string(),
        }
    }

    pub fn risk_percentage(&self) -> f64 {
        self.probability * 100.0
    }
}

/// Multipart fields for `/send-email`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmailRequest {
    pub doctor_email: String,
    pub message: String,
    pub prediction_result: String,
    pub probability: String,
    pub patient_id: String,
    /// `data:application/pdf;base64,...`
    pub pdf_attachment: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
