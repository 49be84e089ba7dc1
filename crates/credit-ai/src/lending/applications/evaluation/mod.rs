mod config;
pub mod fuzzy;
mod metrics;
pub mod network;
mod policy;

pub use config::EvaluationConfig;
pub use fuzzy::{CibilLabel, DtiLabel, FuzzyAssessment, FuzzyEvaluator, Membership, RuleTable};
pub use metrics::{DerivedMetrics, MetricsDisplay};
pub use network::{NetworkAssessment, NetworkScorer, NetworkWeights, NormalizedFeatures};
pub use policy::RejectionReason;

use super::domain::LoanApplication;
use crate::confidentiality::{CIPHER_SUITE, DEFAULT_KDF_ITERATIONS, KDF_ALGORITHM};
use policy::{decide, explain};
use serde::{Deserialize, Serialize};

/// Stateless evaluator combining the network, fuzzy, and data-security assessments.
///
/// Models are injected at construction and only read afterwards.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
    network: NetworkScorer,
    fuzzy: FuzzyEvaluator,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_models(config, NetworkScorer::default(), FuzzyEvaluator::standard())
    }

    pub fn with_models(
        config: EvaluationConfig,
        network: NetworkScorer,
        fuzzy: FuzzyEvaluator,
    ) -> Self {
        Self {
            config,
            network,
            fuzzy,
        }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn network(&self) -> &NetworkScorer {
        &self.network
    }

    pub fn fuzzy(&self) -> &FuzzyEvaluator {
        &self.fuzzy
    }

    pub fn evaluate(&self, application: &LoanApplication) -> HybridResult {
        let metrics = DerivedMetrics::from_application(application);
        let cibil_score = f64::from(application.cibil_score);

        let features = NormalizedFeatures::from_inputs(
            cibil_score,
            metrics.dti_ratio,
            application.employment_years,
            metrics.loan_to_income_ratio,
            application.income,
        );
        let network = self.network.predict(&features);
        let fuzzy = self.fuzzy.evaluate(cibil_score, metrics.dti_ratio);

        let aiml_score = network.score;
        let soft_computing_score = f64::from(fuzzy.score);
        let compliance_score = self.config.compliance_score;
        let weight = self.config.technique_weight;
        let final_score =
            aiml_score * weight + soft_computing_score * weight + compliance_score * weight;

        let verdict = decide(final_score, application, &metrics, &self.config);
        let explanation = explain(&verdict, final_score, &self.config);
        let breakdown = self.breakdown(&network, &fuzzy);

        HybridResult {
            approved: verdict.approved,
            final_score,
            aiml_score,
            soft_computing_score,
            compliance_score,
            crypto_usage: format!("{CIPHER_SUITE} encryption active for all personal data"),
            breakdown,
            explanation,
            rejection_reasons: verdict.reasons,
            details: TechnicalDetails {
                metrics_display: metrics.display(),
                metrics,
                network,
                fuzzy,
            },
        }
    }

    fn breakdown(
        &self,
        network: &NetworkAssessment,
        fuzzy: &FuzzyAssessment,
    ) -> Vec<TechniqueBreakdown> {
        let weight = self.config.weight_percent();

        vec![
            TechniqueBreakdown {
                technique: Technique::NeuralNetwork,
                weight,
                score: display_points(network.score),
                rationale: format!(
                    "Feed-forward network with {} parameters. Confidence: {:.1}%",
                    network.parameter_count,
                    network.confidence * 100.0
                ),
            },
            TechniqueBreakdown {
                technique: Technique::FuzzyLogic,
                weight,
                score: fuzzy.score,
                rationale: fuzzy.classification.clone(),
            },
            TechniqueBreakdown {
                technique: Technique::DataSecurity,
                weight,
                score: display_points(self.config.compliance_score),
                rationale: format!(
                    "{CIPHER_SUITE} encryption with {KDF_ALGORITHM} key derivation ({} iterations)",
                    group_thousands(DEFAULT_KDF_ITERATIONS)
                ),
            },
        ]
    }
}

impl Default for EvaluationEngine {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}

/// Scoring technique contributing to the hybrid verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    NeuralNetwork,
    FuzzyLogic,
    DataSecurity,
}

impl Technique {
    pub fn label(&self) -> &'static str {
        match self {
            Technique::NeuralNetwork => "AIML (Neural Network)",
            Technique::FuzzyLogic => "Soft Computing (Fuzzy Logic)",
            Technique::DataSecurity => "Cryptography (Data Security)",
        }
    }
}

/// Discrete contribution to the verdict, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueBreakdown {
    pub technique: Technique,
    /// Whole-percent weight.
    pub weight: u8,
    pub score: u8,
    pub rationale: String,
}

/// Raw sub-results behind a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalDetails {
    pub metrics: DerivedMetrics,
    pub metrics_display: MetricsDisplay,
    pub network: NetworkAssessment,
    pub fuzzy: FuzzyAssessment,
}

/// Evaluation output describing the hybrid score and decision trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridResult {
    pub approved: bool,
    /// Unrounded; the approval threshold is applied to this value.
    pub final_score: f64,
    pub aiml_score: f64,
    pub soft_computing_score: f64,
    pub compliance_score: f64,
    pub crypto_usage: String,
    pub breakdown: Vec<TechniqueBreakdown>,
    pub explanation: String,
    pub rejection_reasons: Vec<RejectionReason>,
    pub details: TechnicalDetails,
}

impl HybridResult {
    pub fn display_score(&self) -> i64 {
        self.final_score.round() as i64
    }

    pub fn display_aiml_score(&self) -> i64 {
        self.aiml_score.round() as i64
    }

    pub fn display_soft_computing_score(&self) -> i64 {
        self.soft_computing_score.round() as i64
    }
}

fn display_points(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
