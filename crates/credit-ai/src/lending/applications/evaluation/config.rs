use serde::{Deserialize, Serialize};

/// Combination weights and hard eligibility gates for the hybrid verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Multiplier applied to each of the three technique scores.
    pub technique_weight: f64,
    /// Data-security score asserted while the confidentiality service is active.
    pub compliance_score: f64,
    pub approval_threshold: f64,
    pub minimum_cibil_score: u16,
    pub maximum_dti_ratio: f64,
    pub maximum_loan_to_income_ratio: f64,
}

impl EvaluationConfig {
    /// Weight rendered in breakdowns, as a whole percentage.
    pub fn weight_percent(&self) -> u8 {
        (self.technique_weight * 100.0).round() as u8
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            technique_weight: 0.33,
            compliance_score: 100.0,
            approval_threshold: 60.0,
            minimum_cibil_score: 650,
            maximum_dti_ratio: 60.0,
            maximum_loan_to_income_ratio: 5.0,
        }
    }
}
