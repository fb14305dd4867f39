//! Contributing factors: server-supplied, or derived from the raw form
//! values with fixed clinical cutoffs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ICON: &str = "⚠️";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    #[serde(other)]
    Low,
}

impl Impact {
    pub fn css_class(&self) -> &'static str {
        match self {
            Impact::High => "high-impact",
            Impact::Medium => "medium-impact",
            Impact::Low => "low-impact",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContributingFactor {
    pub name: String,
    pub value: String,
    pub description: String,
    pub impact: Impact,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ContributingFactor {
    fn derived(name: &str, value: String, description: &str, impact: Impact, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            value,
            description: description.to_string(),
            impact,
            icon: Some(icon.to_string()),
        }
    }

    pub fn icon(&self) -> &str {
        self.icon
            .as_deref()
            .filter(|i| !i.is_empty())
            .unwrap_or(DEFAULT_ICON)
    }
}

/// Raw form values keyed by payload parameter name.
pub type FormValues = BTreeMap<&'static str, String>;

/// Leading-integer parse: optional sign then digits, trailing text ignored.
/// `"65.9"` reads as 65; empty or non-numeric text reads as nothing.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

fn int_value(values: &FormValues, name: &str) -> Option<i64> {
    values.get(name).and_then(|v| leading_int(v))
}

/// Evaluated in a fixed order: age, cholesterol, blood pressure, max heart
/// rate, exercise angina, major vessels. Missing or unparsable values never
/// produce a factor.
pub fn generate_contributing_factors(values: &FormValues) -> Vec<ContributingFactor> {
    let mut factors = Vec::new();

    if let Some(age) = int_value(values, "age").filter(|a| *a > 60) {
        factors.push(ContributingFactor::derived(
            "Age",
            format!("{} years", age),
            "Age is a significant risk factor for heart disease.",
            Impact::High,
            "👴",
        ));
    }

    match int_value(values, "chol") {
        Some(chol) if chol > 240 => factors.push(ContributingFactor::derived(
            "Cholesterol",
            format!("{} mg/dl", chol),
            "Your cholesterol is above the recommended level (240 mg/dl).",
            Impact::High,
            "🔴",
        )),
        Some(chol) if chol > 200 => factors.push(ContributingFactor::derived(
            "Cholesterol",
            format!("{} mg/dl", chol),
            "Your cholesterol is borderline high (recommended is below 200 mg/dl).",
            Impact::Medium,
            "🟠",
        )),
        _ => {}
    }

    match int_value(values, "trestbps") {
        Some(bp) if bp >= 140 => factors.push(ContributingFactor::derived(
            "Blood Pressure",
            format!("{} mm Hg", bp),
            "Your blood pressure is elevated (hypertension range).",
            Impact::High,
            "📈",
        )),
        Some(bp) if bp >= 120 => factors.push(ContributingFactor::derived(
            "Blood Pressure",
            format!("{} mm Hg", bp),
            "Your blood pressure is borderline high.",
            Impact::Medium,
            "📊",
        )),
        _ => {}
    }

    if let Some(rate) = int_value(values, "thalach").filter(|r| *r < 100) {
        factors.push(ContributingFactor::derived(
            "Maximum Heart Rate",
            format!("{} bpm", rate),
            "Your maximum heart rate is lower than expected, which can indicate reduced exercise capacity.",
            Impact::Medium,
            "❤️",
        ));
    }

    if values.get("exang").map(String::as_str) == Some("1") {
        factors.push(ContributingFactor::derived(
            "Exercise Induced Angina",
            "Yes".to_string(),
            "Chest pain during exercise is a significant indicator of heart disease.",
            Impact::High,
            "⚡",
        ));
    }

    if int_value(values, "ca").filter(|n| *n > 0).is_some() {
        factors.push(ContributingFactor::derived(
            "Major Vessels",
            values.get("ca").cloned().unwrap_or_default(),
            "The number of major blood vessels with significant blockage.",
            Impact::High,
            "🚧",
        ));
    }

    factors
}

/// Server factors win when present; otherwise derive locally.
pub fn explain(server: Option<&[ContributingFactor]>, values: &FormValues) -> Vec<ContributingFactor> {
    match server {
        Some(factors) => factors.to_vec(),
        None => generate_contributing_factors(values),
    }
}
