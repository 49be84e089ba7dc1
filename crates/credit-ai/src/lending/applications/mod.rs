//! Loan application intake, hybrid evaluation, and decision history.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicationId, ApplicationSubmission, LoanApplication, LoanApplicationStatus,
};
pub use evaluation::{
    EvaluationConfig, EvaluationEngine, HybridResult, RejectionReason, Technique,
    TechniqueBreakdown,
};
pub use intake::{IntakeGuard, ValidationError};
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, RepositoryError,
};
pub use router::application_router;
pub use service::{LoanApplicationService, LoanServiceError};
