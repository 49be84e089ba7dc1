use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantId, ApplicationId, ApplicationSubmission, LoanApplicationStatus};
use super::evaluation::HybridResult;

/// Repository record holding the raw submission alongside its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub submitted_at: DateTime<Utc>,
    pub submission: ApplicationSubmission,
    pub result: HybridResult,
}

impl ApplicationRecord {
    pub fn status(&self) -> LoanApplicationStatus {
        LoanApplicationStatus::from_approval(self.result.approved)
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            applicant_id: self.applicant_id.clone(),
            submitted_at: self.submitted_at,
            status: self.status().label(),
            final_score: self.result.display_score(),
            explanation: self.result.explanation.clone(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Records for one applicant, in any order.
    fn for_applicant(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub submitted_at: DateTime<Utc>,
    pub status: &'static str,
    pub final_score: i64,
    pub explanation: String,
}
