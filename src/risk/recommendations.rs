//! Lifestyle / monitoring / medical advice lists.

use super::classifier::RiskCategory;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    #[serde(default)]
    pub lifestyle: Vec<String>,
    #[serde(default)]
    pub monitoring: Vec<String>,
    #[serde(default)]
    pub medical: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Server,
    Static,
}

const LIFESTYLE: &[&str] = &[
    "Maintain a heart-healthy diet rich in fruits, vegetables, and whole grains",
    "Engage in regular physical activity (at least 150 minutes of moderate exercise per week)",
    "Avoid tobacco products and limit alcohol consumption",
    "Manage stress through relaxation techniques",
];

const MONITORING_LOW: &[&str] = &[
    "Regular annual physical examination with your doctor",
    "Blood pressure check every 6 months",
    "Cholesterol screening every 4-6 years (or as recommended)",
    "Maintain a healthy weight and track BMI annually",
];

const MONITORING_MODERATE: &[&str] = &[
    "Schedule a follow-up appointment with your doctor within 3 months",
    "Monitor blood pressure at home regularly (at least weekly)",
    "Cholesterol and blood glucose tests every 6-12 months",
    "Consider a baseline electrocardiogram (ECG) test",
    "Track your diet and exercise in a health journal",
];

const MONITORING_HIGH: &[&str] = &[
    "Immediate follow-up with a cardiologist within 2-4 weeks",
    "Daily home blood pressure monitoring and tracking",
    "Comprehensive cardiac workup including stress test and imaging",
    "Frequent lab work (every 3-4 months) to monitor cholesterol and other markers",
    "Careful monitoring of symptoms like chest pain, shortness of breath, or fatigue",
];

const MEDICAL_LOW: &[&str] = &[
    "Discuss results at your next regular check-up",
    "No immediate medical intervention required",
    "Continue following general heart health guidelines",
];

const MEDICAL_MODERATE: &[&str] = &[
    "Schedule an appointment with your primary care physician soon",
    "Discuss whether you should see a cardiologist for further evaluation",
    "Consider medication options if other risk factors are present",
    "Evaluate need for additional cardiac testing",
];

const MEDICAL_HIGH: &[&str] = &[
    "Seek prompt medical attention - this is a high priority",
    "Request referral to a cardiologist for specialized care",
    "Discuss medication and treatment options",
    "Create a comprehensive cardiac care plan with your healthcare team",
    "Consider joining a cardiac rehabilitation program if recommended",
];

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// Fixed advice for a category. Lifestyle text is the same for everyone.
pub fn static_recommendations(category: RiskCategory) -> Recommendations {
    let (monitoring, medical) = match category {
        RiskCategory::Low => (MONITORING_LOW, MEDICAL_LOW),
        RiskCategory::Moderate => (MONITORING_MODERATE, MEDICAL_MODERATE),
        RiskCategory::High => (MONITORING_HIGH, MEDICAL_HIGH),
    };
    Recommendations {
        lifestyle: owned(LIFESTYLE),
        monitoring: owned(monitoring),
        medical: owned(medical),
    }
}

/// Server lists verbatim when present, static text otherwise.
pub fn compose(
    server: Option<&Recommendations>,
    category: RiskCategory,
) -> (Recommendations, RecommendationSource) {
    match server {
        Some(recs) => (recs.clone(), RecommendationSource::Server),
        None => (static_recommendations(category), RecommendationSource::Static),
    }
}
