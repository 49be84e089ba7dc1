use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier of the applicant who owns a submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Form fields exactly as the applicant entered them.
///
/// Numeric fields are kept wide so the intake guard, not deserialization, decides what is
/// out of domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub applicant_id: ApplicantId,
    /// Monthly income in currency units.
    pub income: f64,
    pub loan_amount: f64,
    pub cibil_score: i64,
    pub employment_years: f64,
    /// Existing monthly EMI obligations.
    pub existing_loans: f64,
}

/// Validated application consumed by the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub income: f64,
    pub loan_amount: f64,
    pub cibil_score: u16,
    pub employment_years: f64,
    pub existing_loans: f64,
}

/// Final state of an evaluated application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanApplicationStatus {
    Approved,
    Rejected,
}

impl LoanApplicationStatus {
    pub fn from_approval(approved: bool) -> Self {
        if approved {
            Self::Approved
        } else {
            Self::Rejected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}
