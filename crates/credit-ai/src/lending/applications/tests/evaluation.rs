use super::common::*;
use crate::lending::applications::evaluation::{
    CibilLabel, DtiLabel, EvaluationConfig, EvaluationEngine, RejectionReason, Technique,
};

#[test]
fn strong_profile_is_approved_with_reference_scores() {
    let engine = evaluation_engine();

    let result = engine.evaluate(&strong_application());

    assert!(result.approved);
    assert!(result.rejection_reasons.is_empty());
    assert_close(result.aiml_score, 69.191_413);
    assert_eq!(result.soft_computing_score, 85.0);
    assert_eq!(result.compliance_score, 100.0);
    assert_close(result.final_score, 83.883_166);
    assert_eq!(result.display_score(), 84);
    assert_eq!(result.display_aiml_score(), 69);
    assert_eq!(
        result.explanation,
        "Loan APPROVED. Hybrid system score: 83.9/100. All three techniques contributed equally (33% each)."
    );
}

#[test]
fn strong_profile_details_expose_audit_trail() {
    let result = evaluation_engine().evaluate(&strong_application());
    let details = &result.details;

    assert_close(details.metrics.monthly_loan_emi, 416.666_667);
    assert_close(details.metrics.dti_ratio, 20.833_333);
    assert_close(details.metrics.loan_to_income_ratio, 0.833_333);
    assert_eq!(details.metrics_display.dti_ratio, "20.83%");
    assert_eq!(details.fuzzy.cibil_label, CibilLabel::Good);
    assert_eq!(details.fuzzy.dti_label, DtiLabel::Low);
    assert_close(details.network.features.cibil(), 0.75);
    assert_eq!(result.crypto_usage, "AES-256-GCM encryption active for all personal data");
}

#[test]
fn breakdown_lists_three_equal_techniques() {
    let result = evaluation_engine().evaluate(&strong_application());

    let techniques: Vec<Technique> = result
        .breakdown
        .iter()
        .map(|entry| entry.technique)
        .collect();
    assert_eq!(
        techniques,
        vec![
            Technique::NeuralNetwork,
            Technique::FuzzyLogic,
            Technique::DataSecurity
        ]
    );
    assert!(result.breakdown.iter().all(|entry| entry.weight == 33));

    let scores: Vec<u8> = result.breakdown.iter().map(|entry| entry.score).collect();
    assert_eq!(scores, vec![69, 85, 100]);
    assert_eq!(
        result.breakdown[0].rationale,
        "Feed-forward network with 29 parameters. Confidence: 69.2%"
    );
    assert_eq!(
        result.breakdown[2].rationale,
        "AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation (100,000 iterations)"
    );
    assert_eq!(Technique::FuzzyLogic.label(), "Soft Computing (Fuzzy Logic)");
}

#[test]
fn stretched_profile_collects_every_failed_gate() {
    let result = evaluation_engine().evaluate(&stretched_application());

    assert!(!result.approved);
    assert_close(result.aiml_score, 68.849_300);
    assert_eq!(result.soft_computing_score, 5.0);
    assert_close(result.final_score, 57.370_269);
    assert_eq!(result.details.fuzzy.cibil_label, CibilLabel::Poor);
    assert_eq!(result.details.fuzzy.dti_label, DtiLabel::High);

    assert_eq!(result.rejection_reasons.len(), 3);
    assert!(matches!(
        result.rejection_reasons[0],
        RejectionReason::ScoreBelowThreshold { .. }
    ));
    assert!(matches!(
        result.rejection_reasons[1],
        RejectionReason::CibilTooLow {
            score: 600,
            minimum: 650
        }
    ));
    match &result.rejection_reasons[2] {
        RejectionReason::DtiTooHigh { ratio, maximum } => {
            assert_close(*ratio, 67.5);
            assert_eq!(*maximum, 60.0);
        }
        other => panic!("expected DTI rejection, got {other:?}"),
    }

    assert_eq!(
        result.explanation,
        "Loan REJECTED. Hybrid score: 57.4/100 below threshold. CIBIL too low. DTI ratio too high."
    );
}

#[test]
fn high_score_is_still_rejected_by_loan_to_income_gate() {
    let result = evaluation_engine().evaluate(&oversized_application());

    assert!(!result.approved);
    assert_close(result.final_score, 85.285_871);
    assert_eq!(result.soft_computing_score, 85.0);
    match result.rejection_reasons.as_slice() {
        [RejectionReason::LoanTooLarge { ratio, maximum }] => {
            assert_close(*ratio, 6.666_667);
            assert_eq!(*maximum, 5.0);
        }
        other => panic!("expected loan-to-income rejection only, got {other:?}"),
    }
    assert_eq!(
        result.explanation,
        "Loan REJECTED. Hybrid score: 85.3/100. Loan amount too large."
    );
}

#[test]
fn inclusive_gates_accept_exact_boundaries() {
    let result = evaluation_engine().evaluate(&boundary_application());

    assert_eq!(result.details.metrics.monthly_loan_emi, 100.0);
    assert_eq!(result.details.metrics.dti_ratio, 60.0);
    assert_eq!(result.details.fuzzy.cibil_label, CibilLabel::Fair);
    assert_eq!(result.details.fuzzy.dti_label, DtiLabel::High);
    assert_eq!(result.soft_computing_score, 20.0);
    assert_close(result.final_score, 62.440_786);
    assert!(result.approved, "reasons: {:?}", result.rejection_reasons);
}

#[test]
fn threshold_gate_uses_unrounded_score() {
    let baseline = evaluation_engine().evaluate(&strong_application());
    let config = EvaluationConfig {
        approval_threshold: baseline.final_score + 0.01,
        ..EvaluationConfig::default()
    };

    let result = EvaluationEngine::new(config).evaluate(&strong_application());

    assert_eq!(result.display_score(), baseline.display_score());
    assert!(!result.approved);
    assert_eq!(
        result.explanation,
        "Loan REJECTED. Hybrid score: 83.9/100 below threshold."
    );
}

#[test]
fn evaluation_is_deterministic() {
    let engine = evaluation_engine();

    for application in [
        strong_application(),
        stretched_application(),
        oversized_application(),
        boundary_application(),
    ] {
        assert_eq!(engine.evaluate(&application), engine.evaluate(&application));
    }
}

#[test]
fn approval_implies_every_gate_passed() {
    let engine = evaluation_engine();
    let config = evaluation_config();

    for cibil in (300..=900).step_by(25) {
        for existing in [0.0, 5_000.0, 15_000.0, 25_000.0] {
            let result = engine.evaluate(&application(40_000.0, 900_000.0, cibil, 4.0, existing));
            if result.approved {
                assert!(result.final_score >= config.approval_threshold);
                assert!(cibil >= config.minimum_cibil_score);
                assert!(result.details.metrics.dti_ratio <= config.maximum_dti_ratio);
                assert!(
                    result.details.metrics.loan_to_income_ratio
                        <= config.maximum_loan_to_income_ratio
                );
            } else {
                assert!(!result.rejection_reasons.is_empty());
            }
        }
    }
}

#[test]
fn network_score_is_monotone_in_cibil_for_moderate_debt() {
    let engine = evaluation_engine();

    for (income, loan, employment, existing) in [
        (50_000.0, 300_000.0, 3.0, 9_750.0),
        (50_000.0, 600_000.0, 5.0, 12_000.0),
        (100_000.0, 600_000.0, 10.0, 9_500.0),
    ] {
        let mut previous = f64::MIN;
        for cibil in 300..=900 {
            let score = engine
                .evaluate(&application(income, loan, cibil, employment, existing))
                .aiml_score;
            assert!(score >= previous, "score fell at cibil {cibil}");
            previous = score;
        }
    }
}

#[test]
fn network_score_can_dip_with_cibil_at_extreme_debt() {
    let engine = evaluation_engine();
    let at = |cibil| {
        engine
            .evaluate(&application(50_000.0, 1_800_000.0, cibil, 5.0, 48_500.0))
            .aiml_score
    };

    assert!(at(301) < at(300));
}

#[test]
fn zero_income_rejects_without_panicking() {
    let result = evaluation_engine().evaluate(&application(0.0, 100_000.0, 800, 5.0, 0.0));

    assert!(!result.approved);
    assert!(result.details.metrics.dti_ratio.is_infinite());
    assert!(result
        .rejection_reasons
        .iter()
        .any(|reason| matches!(reason, RejectionReason::DtiTooHigh { .. })));
}
