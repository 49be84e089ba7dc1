use serde::{Deserialize, Serialize};

use super::super::domain::LoanApplication;
use super::config::EvaluationConfig;
use super::metrics::DerivedMetrics;

/// Hard eligibility gate that blocked an approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum RejectionReason {
    ScoreBelowThreshold { score: f64, threshold: f64 },
    CibilTooLow { score: u16, minimum: u16 },
    DtiTooHigh { ratio: f64, maximum: f64 },
    LoanTooLarge { ratio: f64, maximum: f64 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::ScoreBelowThreshold { .. } => "below threshold.".to_string(),
            RejectionReason::CibilTooLow { .. } => "CIBIL too low.".to_string(),
            RejectionReason::DtiTooHigh { .. } => "DTI ratio too high.".to_string(),
            RejectionReason::LoanTooLarge { .. } => "Loan amount too large.".to_string(),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            RejectionReason::ScoreBelowThreshold { score, threshold } => {
                format!("hybrid score {score:.1} below approval threshold {threshold:.1}")
            }
            RejectionReason::CibilTooLow { score, minimum } => {
                format!("CIBIL score {score} below minimum {minimum}")
            }
            RejectionReason::DtiTooHigh { ratio, maximum } => {
                format!("debt-to-income {ratio:.2}% exceeds {maximum:.2}%")
            }
            RejectionReason::LoanTooLarge { ratio, maximum } => {
                format!("loan-to-income {ratio:.2}x exceeds {maximum:.2}x")
            }
        }
    }
}

/// Approval flag plus every gate that failed, in gate order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub approved: bool,
    pub reasons: Vec<RejectionReason>,
}

/// Gates compare against the unrounded score. A gate passes only when its comparison holds,
/// so NaN scores or ratios always reject.
pub(crate) fn decide(
    final_score: f64,
    application: &LoanApplication,
    metrics: &DerivedMetrics,
    config: &EvaluationConfig,
) -> Verdict {
    let mut reasons = Vec::new();

    if !at_least(final_score, config.approval_threshold) {
        reasons.push(RejectionReason::ScoreBelowThreshold {
            score: final_score,
            threshold: config.approval_threshold,
        });
    }

    if application.cibil_score < config.minimum_cibil_score {
        reasons.push(RejectionReason::CibilTooLow {
            score: application.cibil_score,
            minimum: config.minimum_cibil_score,
        });
    }

    if !at_most(metrics.dti_ratio, config.maximum_dti_ratio) {
        reasons.push(RejectionReason::DtiTooHigh {
            ratio: metrics.dti_ratio,
            maximum: config.maximum_dti_ratio,
        });
    }

    if !at_most(
        metrics.loan_to_income_ratio,
        config.maximum_loan_to_income_ratio,
    ) {
        reasons.push(RejectionReason::LoanTooLarge {
            ratio: metrics.loan_to_income_ratio,
            maximum: config.maximum_loan_to_income_ratio,
        });
    }

    Verdict {
        approved: reasons.is_empty(),
        reasons,
    }
}

fn at_least(value: f64, minimum: f64) -> bool {
    value >= minimum
}

fn at_most(value: f64, maximum: f64) -> bool {
    value <= maximum
}

pub(crate) fn explain(verdict: &Verdict, final_score: f64, config: &EvaluationConfig) -> String {
    if verdict.approved {
        return format!(
            "Loan APPROVED. Hybrid system score: {final_score:.1}/100. All three techniques contributed equally ({}% each).",
            config.weight_percent()
        );
    }

    let mut explanation = format!("Loan REJECTED. Hybrid score: {final_score:.1}/100");
    let below_threshold = verdict
        .reasons
        .iter()
        .any(|reason| matches!(reason, RejectionReason::ScoreBelowThreshold { .. }));
    if below_threshold {
        explanation.push_str(" below threshold.");
    } else {
        explanation.push('.');
    }

    for reason in verdict
        .reasons
        .iter()
        .filter(|reason| !matches!(reason, RejectionReason::ScoreBelowThreshold { .. }))
    {
        explanation.push(' ');
        explanation.push_str(&reason.summary());
    }

    explanation
}
