//! Average risk by age group, for the comparison bars.

use serde::{Deserialize, Serialize};

pub const AVERAGE_RISK_BY_AGE: [(&str, f64); 7] = [
    ("20-29", 0.05),
    ("30-39", 0.08),
    ("40-49", 0.15),
    ("50-59", 0.25),
    ("60-69", 0.35),
    ("70-79", 0.45),
    ("80+", 0.55),
];

/// Anything under 30, or no age at all, falls in the youngest group.
pub fn age_group(age: Option<f64>) -> &'static str {
    let idx = match age {
        Some(a) if a >= 80.0 => 6,
        Some(a) if a >= 30.0 => ((a as i64 - 20) / 10) as usize,
        _ => 0,
    };
    AVERAGE_RISK_BY_AGE[idx].0
}

pub fn average_risk(group: &str) -> Option<f64> {
    AVERAGE_RISK_BY_AGE
        .iter()
        .find(|(g, _)| *g == group)
        .map(|(_, risk)| *risk)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiskComparison {
    pub age_group: String,
    pub user_percent: f64,
    pub average_percent: f64,
}

impl RiskComparison {
    pub fn new(user_percent: f64, age: Option<f64>) -> Self {
        let group = age_group(age);
        Self {
            age_group: group.to_string(),
            user_percent,
            average_percent: average_risk(group).unwrap_or(0.0) * 100.0,
        }
    }
}
