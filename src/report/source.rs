//! Everything the report prints, read off the rendered result view.

use crate::form::{Field, FormInput};
use crate::view::render::factor_name_text;
use crate::view::ResultView;

pub const PATIENT_ID_FALLBACK: &str = "Not provided";

#[derive(Debug, Clone, PartialEq)]
pub struct FactorLine {
    /// Name line as displayed: name then value.
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSource {
    pub patient_id: String,
    pub age: String,
    pub gender: String,
    pub message: String,
    pub probability_text: String,
    pub interpretation: String,
    pub factors: Vec<FactorLine>,
    pub lifestyle: Vec<String>,
    pub monitoring: Vec<String>,
    pub medical: Vec<String>,
}

impl ReportSource {
    pub fn read(view: &ResultView, form: &FormInput) -> Self {
        Self {
            patient_id: form.patient_id().unwrap_or(PATIENT_ID_FALLBACK).to_string(),
            age: form.value(Field::Age).unwrap_or_default().to_string(),
            gender: form.selected_text(Field::Gender).unwrap_or_default().to_string(),
            message: view.message.clone(),
            probability_text: view.probability_text.clone(),
            interpretation: strip_markup(&view.interpretation_html),
            factors: view
                .factors
                .iter()
                .map(|f| FactorLine {
                    name: factor_name_text(f),
                    description: f.description.clone(),
                })
                .collect(),
            lifestyle: view.recommendations.lifestyle.clone(),
            monitoring: view.recommendations.monitoring.clone(),
            medical: view.recommendations.medical.clone(),
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.message.contains("High risk")
    }

    /// First decimal number in the probability text.
    pub fn risk_percentage(&self) -> Option<f64> {
        parse_percentage(&self.probability_text)
    }
}

pub fn parse_percentage(text: &str) -> Option<f64> {
    let re = regex::Regex::new(r"\d+\.\d+").ok()?;
    re.find(text)?.as_str().parse().ok()
}

/// Drops tags, decodes the few entities the renderer emits and collapses
/// whitespace.
pub fn strip_markup(html: &str) -> String {
    let text = if let Ok(tags) = regex::Regex::new(r"<[^>]*>") {
        tags.replace_all(html, " ").into_owned()
    } else {
        html.to_string()
    };
    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
