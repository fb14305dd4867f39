//! Probability → risk category, and the interpretation shown under the meter.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MODERATE_THRESHOLD: f64 = 0.30;
pub const HIGH_THRESHOLD: f64 = 0.70;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    /// CSS-style class name used by the meter and the interpretation panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::High => "High Risk",
        }
    }

    pub fn shows_emergency_warning(&self) -> bool {
        matches!(self, RiskCategory::High)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(probability: f64) -> RiskCategory {
    if probability < MODERATE_THRESHOLD {
        RiskCategory::Low
    } else if probability < HIGH_THRESHOLD {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

/// Where the displayed confidence figure came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum Confidence {
    Server(f64),
    /// Not a model estimate. Only produced when explicitly enabled.
    Placeholder(u8),
}

impl Confidence {
    pub fn resolve(server: Option<f64>, allow_placeholder: bool) -> Option<Self> {
        match server {
            Some(value) => Some(Confidence::Server(value)),
            None if allow_placeholder => Some(Confidence::Placeholder(
                rand::thread_rng().gen_range(80..=95),
            )),
            None => None,
        }
    }

    pub fn percent_text(&self) -> String {
        match self {
            Confidence::Server(value) => format!("{:.0}", value),
            Confidence::Placeholder(value) => value.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Confidence::Placeholder(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub category: RiskCategory,
    pub headline: String,
    pub body: String,
    pub confidence: Option<Confidence>,
}

impl Interpretation {
    pub fn new(category: RiskCategory, risk_percentage: f64, confidence: Option<Confidence>) -> Self {
        let (advice, body) = match category {
            RiskCategory::High => (
                "You should consult a doctor soon.",
                format!(
                    "Your heart disease risk is significantly elevated ({:.1}%), which means you \
                     should take this result seriously and consider medical consultation.",
                    risk_percentage
                ),
            ),
            RiskCategory::Moderate => (
                "Consider discussing with a healthcare provider.",
                format!(
                    "Your heart disease risk ({:.1}%) is higher than ideal, suggesting you may \
                     benefit from lifestyle changes and preventive care.",
                    risk_percentage
                ),
            ),
            RiskCategory::Low => (
                "Continue with healthy habits.",
                format!(
                    "Your heart disease risk ({:.1}%) is relatively low, but maintaining \
                     heart-healthy lifestyle choices is still important.",
                    risk_percentage
                ),
            ),
        };

        Self {
            category,
            headline: advice.to_string(),
            body,
            confidence,
        }
    }

    pub fn confidence_sentence(&self) -> Option<String> {
        self.confidence.map(|c| {
            format!(
                "Our model is {}% confident in this prediction.",
                c.percent_text()
            )
        })
    }

    /// Panel markup, as placed on the page.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<strong>{}:</strong> {} {}",
            self.category.title(),
            self.headline,
            self.body
        );
        if let Some(sentence) = self.confidence_sentence() {
            html.push_str(&format!("<br><br><strong>Confidence:</strong> {}", sentence));
        }
        html
    }
}
