//! Turns a prediction result into the state of the result panel.
//!
//! Rendering is pure: the same result and form always give the same view
//! (apart from a placeholder confidence, when enabled). The report exporter
//! reads its text from this view rather than recomputing it.

use crate::client::PredictionResult;
use crate::form::{Field, FormInput};
use crate::risk::{
    classify, compose, explain, Confidence, ContributingFactor, Interpretation, RecommendationSource,
    Recommendations, RiskCategory, RiskComparison,
};
use serde::Serialize;

pub const TICK_STEP: u8 = 10;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub percent: u8,
    pub major: bool,
}

pub fn meter_ticks() -> Vec<Tick> {
    (0..=100)
        .step_by(TICK_STEP as usize)
        .map(|percent| Tick {
            percent,
            major: percent % 30 == 0,
        })
        .collect()
}

/// Fill width and pointer position are both `percent`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RiskMeter {
    pub percent: f64,
    pub category: RiskCategory,
    pub ticks: Vec<Tick>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecommendationPanels {
    pub lifestyle: String,
    pub monitoring: String,
    pub medical: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderInstruction {
    ShowResult,
    ShowEmergencyWarning(bool),
    ScrollIntoView,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResultView {
    pub message: String,
    /// `high-risk` or `low-risk`.
    pub result_class: &'static str,
    pub probability_text: String,
    pub patient_info: Option<String>,
    pub meter: RiskMeter,
    pub emergency_warning: bool,
    pub interpretation: Interpretation,
    pub interpretation_html: String,
    pub factors: Vec<ContributingFactor>,
    pub factors_html: String,
    pub recommendations: Recommendations,
    pub recommendation_source: RecommendationSource,
    pub recommendation_panels: RecommendationPanels,
    pub comparison: RiskComparison,
    pub note: Option<String>,
}

impl ResultView {
    pub fn category(&self) -> RiskCategory {
        self.meter.category
    }

    /// Whether the confidence shown is not a model estimate.
    pub fn confidence_is_placeholder(&self) -> bool {
        self.interpretation
            .confidence
            .map(|c| c.is_placeholder())
            .unwrap_or(false)
    }
}

/// Visible text of a factor's name line: the name followed by its value.
pub fn factor_name_text(factor: &ContributingFactor) -> String {
    format!("{} {}", factor.name, factor.value)
}

pub fn probability_text(probability: f64) -> String {
    format!("Probability: {:.2}%", probability * 100.0)
}

pub fn render(
    result: &PredictionResult,
    form: &FormInput,
    allow_placeholder: bool,
) -> (ResultView, Vec<RenderInstruction>) {
    let percent = result.risk_percentage();
    let category = classify(result.probability);
    let values = form.values_by_param();

    let confidence = Confidence::resolve(result.confidence, allow_placeholder);
    let interpretation = Interpretation::new(category, percent, confidence);
    let interpretation_html = interpretation.to_html();

    let factors = explain(result.contributing_factors.as_deref(), &values);
    let factors_html = factors.iter().map(factor_html).collect::<String>();

    let (recommendations, recommendation_source) =
        compose(result.recommendations.as_ref(), category);
    let recommendation_panels = RecommendationPanels {
        lifestyle: panel_html("Lifestyle Changes", &recommendations.lifestyle),
        monitoring: panel_html("Monitoring Plan", &recommendations.monitoring),
        medical: panel_html("Medical Consultation", &recommendations.medical),
    };

    let age = form
        .value(Field::Age)
        .and_then(|a| a.trim().parse::<f64>().ok());

    let emergency_warning = category.shows_emergency_warning();
    let view = ResultView {
        message: result.message(),
        result_class: if result.is_positive() { "high-risk" } else { "low-risk" },
        probability_text: probability_text(result.probability),
        patient_info: form
            .patient_id()
            .map(|id| format!("<p>Patient ID: {}</p>", escape_html(id))),
        meter: RiskMeter {
            percent,
            category,
            ticks: meter_ticks(),
        },
        emergency_warning,
        interpretation,
        interpretation_html,
        factors,
        factors_html,
        recommendations,
        recommendation_source,
        recommendation_panels,
        comparison: RiskComparison::new(percent, age),
        note: result.note.clone(),
    };

    let instructions = vec![
        RenderInstruction::ShowEmergencyWarning(emergency_warning),
        RenderInstruction::ShowResult,
        RenderInstruction::ScrollIntoView,
    ];
    (view, instructions)
}

fn factor_html(factor: &ContributingFactor) -> String {
    format!(
        "<div class=\"factor-item\"><div class=\"factor-icon {}\">{}</div>\
         <div class=\"factor-details\"><div class=\"factor-name\">{} \
         <span class=\"factor-value\">{}</span></div>\
         <div class=\"factor-description\">{}</div></div></div>",
        factor.impact.css_class(),
        escape_html(factor.icon()),
        escape_html(&factor.name),
        escape_html(&factor.value),
        escape_html(&factor.description),
    )
}

fn panel_html(heading: &str, items: &[String]) -> String {
    let mut html = format!("<h4>{}</h4><ul>", heading);
    for item in items {
        html.push_str("<li>");
        html.push_str(&escape_html(item));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::Impact;

    fn result(prediction: u8, probability: f64) -> PredictionResult {
        PredictionResult {
            prediction,
            probability,
            confidence: None,
            contributing_factors: None,
            recommendations: None,
            message: None,
            note: None,
        }
    }

    #[test]
    fn ticks_mark_every_thirty_as_major() {
        let ticks = meter_ticks();
        assert_eq!(ticks.len(), 11);
        let majors: Vec<u8> = ticks.iter().filter(|t| t.major).map(|t| t.percent).collect();
        assert_eq!(majors, vec![0, 30, 60, 90]);
    }

    #[test]
    fn low_result_renders_without_warning() {
        let mut form = FormInput::new();
        form.set_numeric(Field::Age, "45").unwrap();
        let (view, instructions) = render(&result(0, 0.1234), &form, false);

        assert_eq!(view.message, "Low risk of heart disease");
        assert_eq!(view.result_class, "low-risk");
        assert_eq!(view.probability_text, "Probability: 12.34%");
        assert_eq!(view.patient_info, None);
        assert_eq!(view.category(), RiskCategory::Low);
        assert!(!view.emergency_warning);
        assert!(!view.interpretation_html.contains("Confidence"));
        assert_eq!(view.comparison.age_group, "40-49");
        assert_eq!(view.recommendation_source, RecommendationSource::Static);
        assert!(view.recommendation_panels.lifestyle.starts_with("<h4>Lifestyle Changes</h4><ul><li>"));
        assert_eq!(instructions.last(), Some(&RenderInstruction::ScrollIntoView));
        assert!(instructions.contains(&RenderInstruction::ShowEmergencyWarning(false)));
    }

    #[test]
    fn server_factors_are_rendered_as_sent() {
        let mut res = result(1, 0.9);
        res.confidence = Some(88.6);
        res.message = Some("High risk of heart disease".into());
        res.contributing_factors = Some(vec![ContributingFactor {
            name: "Thal".into(),
            value: "7".into(),
            description: "Reversible <defect>".into(),
            impact: Impact::Medium,
            icon: None,
        }]);
        let mut form = FormInput::new();
        form.patient_id = Some("A&B".into());

        let (view, _) = render(&res, &form, false);
        assert!(view.emergency_warning);
        assert_eq!(view.result_class, "high-risk");
        assert_eq!(view.patient_info.as_deref(), Some("<p>Patient ID: A&amp;B</p>"));
        assert_eq!(view.factors.len(), 1);
        assert!(view.factors_html.contains("medium-impact"));
        assert!(view.factors_html.contains("⚠️"));
        assert!(view.factors_html.contains("Reversible &lt;defect&gt;"));
        assert_eq!(factor_name_text(&view.factors[0]), "Thal 7");
        assert!(view.interpretation_html.contains("Our model is 89% confident"));
        assert!(!view.confidence_is_placeholder());
    }

    #[test]
    fn placeholder_confidence_is_flagged() {
        let (view, _) = render(&result(0, 0.5), &FormInput::new(), true);
        assert!(view.confidence_is_placeholder());
        assert_eq!(view.category(), RiskCategory::Moderate);
    }
}
