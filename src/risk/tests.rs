use super::*;

fn scenario_values() -> FormValues {
    let mut values = FormValues::new();
    values.insert("age", "65".into());
    values.insert("chol", "250".into());
    values.insert("trestbps", "150".into());
    values.insert("thalach", "90".into());
    values.insert("exang", "1".into());
    values.insert("ca", "2".into());
    values
}

#[test]
fn every_cutoff_fires_in_order() {
    let factors = generate_contributing_factors(&scenario_values());
    let summary: Vec<(&str, Impact)> = factors
        .iter()
        .map(|f| (f.name.as_str(), f.impact))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Age", Impact::High),
            ("Cholesterol", Impact::High),
            ("Blood Pressure", Impact::High),
            ("Maximum Heart Rate", Impact::Medium),
            ("Exercise Induced Angina", Impact::High),
            ("Major Vessels", Impact::High),
        ]
    );
    assert_eq!(factors[0].value, "65 years");
    assert_eq!(factors[1].value, "250 mg/dl");
    assert_eq!(factors[2].value, "150 mm Hg");
    assert_eq!(factors[3].value, "90 bpm");
    assert_eq!(factors[5].value, "2");
}

#[test]
fn derivation_is_deterministic() {
    let values = scenario_values();
    let first = generate_contributing_factors(&values);
    for _ in 0..10 {
        assert_eq!(generate_contributing_factors(&values), first);
    }
}

#[test]
fn server_factors_take_precedence() {
    let server = vec![ContributingFactor {
        name: "ST Depression".into(),
        value: "2.4".into(),
        description: "Significant ST depression.".into(),
        impact: Impact::High,
        icon: Some("📉".into()),
    }];
    let factors = explain(Some(server.as_slice()), &scenario_values());
    assert_eq!(factors, server);

    let empty: Vec<ContributingFactor> = Vec::new();
    assert!(explain(Some(empty.as_slice()), &scenario_values()).is_empty());
}

#[test]
fn high_probability_points_to_a_cardiologist() {
    let category = classify(0.85);
    assert_eq!(category, RiskCategory::High);
    assert!(category.shows_emergency_warning());

    let (recs, source) = compose(None, category);
    assert_eq!(source, RecommendationSource::Static);
    assert!(recs.medical.iter().any(|line| line.contains("cardiologist")));
}

#[test]
fn moderate_and_low_do_not_warn() {
    assert!(!classify(0.5).shows_emergency_warning());
    assert!(!classify(0.1).shows_emergency_warning());
}
