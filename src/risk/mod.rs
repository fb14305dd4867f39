//! Pure risk components: classification, contributing factors,
//! recommendations and the age-group comparison.

pub mod classifier;
pub mod comparison;
pub mod factors;
pub mod recommendations;

pub use classifier::{classify, Confidence, Interpretation, RiskCategory};
pub use comparison::RiskComparison;
pub use factors::{explain, generate_contributing_factors, ContributingFactor, FormValues, Impact};
pub use recommendations::{compose, RecommendationSource, Recommendations};

#[cfg(test)]
mod tests;
