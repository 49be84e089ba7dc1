use super::domain::{ApplicationSubmission, LoanApplication};

pub const MIN_CIBIL_SCORE: i64 = 300;
pub const MAX_CIBIL_SCORE: i64 = 900;

/// Boundary validation errors raised before an application reaches the scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("monthly income must be greater than zero (found {0})")]
    NonPositiveIncome(f64),
    #[error("loan amount must be greater than zero (found {0})")]
    NonPositiveLoanAmount(f64),
    #[error("CIBIL score must be within 300-900 (found {0})")]
    CibilOutOfRange(i64),
    #[error("employment years cannot be negative (found {0})")]
    NegativeEmploymentYears(f64),
    #[error("existing loan obligations cannot be negative (found {0})")]
    NegativeExistingLoans(f64),
}

/// Guard responsible for turning raw submissions into scoreable applications.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn application_from_submission(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<LoanApplication, ValidationError> {
        let fields = [
            ("income", submission.income),
            ("loan_amount", submission.loan_amount),
            ("employment_years", submission.employment_years),
            ("existing_loans", submission.existing_loans),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ValidationError::NonFinite { field });
        }

        if submission.income <= 0.0 {
            return Err(ValidationError::NonPositiveIncome(submission.income));
        }

        if submission.loan_amount <= 0.0 {
            return Err(ValidationError::NonPositiveLoanAmount(
                submission.loan_amount,
            ));
        }

        if !(MIN_CIBIL_SCORE..=MAX_CIBIL_SCORE).contains(&submission.cibil_score) {
            return Err(ValidationError::CibilOutOfRange(submission.cibil_score));
        }

        if submission.employment_years < 0.0 {
            return Err(ValidationError::NegativeEmploymentYears(
                submission.employment_years,
            ));
        }

        if submission.existing_loans < 0.0 {
            return Err(ValidationError::NegativeExistingLoans(
                submission.existing_loans,
            ));
        }

        Ok(LoanApplication {
            income: submission.income,
            loan_amount: submission.loan_amount,
            cibil_score: submission.cibil_score as u16,
            employment_years: submission.employment_years,
            existing_loans: submission.existing_loans,
        })
    }
}
