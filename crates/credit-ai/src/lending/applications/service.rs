use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{ApplicantId, ApplicationId, ApplicationSubmission};
use super::evaluation::{EvaluationConfig, EvaluationEngine, HybridResult};
use super::intake::{IntakeGuard, ValidationError};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};

/// Service composing the intake guard, repository, and hybrid evaluation engine.
pub struct LoanApplicationService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
    engine: Arc<EvaluationEngine>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EvaluationConfig) -> Self {
        Self::with_engine(repository, Arc::new(EvaluationEngine::new(config)))
    }

    pub fn with_engine(repository: Arc<R>, engine: Arc<EvaluationEngine>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            engine,
        }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Validate, evaluate, and persist a submission.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let result = self.preview(&submission)?;
        let application_id = next_application_id();

        let record = ApplicationRecord {
            application_id: application_id.clone(),
            applicant_id: submission.applicant_id.clone(),
            submitted_at: Utc::now(),
            submission,
            result,
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %application_id.0,
            applicant_id = %stored.applicant_id.0,
            approved = stored.result.approved,
            final_score = stored.result.final_score,
            "loan application evaluated"
        );
        Ok(stored)
    }

    /// Validate and evaluate without persisting anything.
    pub fn preview(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<HybridResult, LoanServiceError> {
        let application = self
            .guard
            .application_from_submission(submission)
            .inspect_err(|error| {
                warn!(
                    applicant_id = %submission.applicant_id.0,
                    %error,
                    "loan application rejected at intake"
                );
            })?;

        Ok(self.engine.evaluate(&application))
    }

    pub fn get(&self, application_id: &ApplicationId) -> Result<ApplicationRecord, LoanServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Every record for the applicant, newest first.
    pub fn history(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, LoanServiceError> {
        let mut records = self.repository.for_applicant(applicant_id)?;
        records.sort_by_key(|record| {
            (
                Reverse(record.submitted_at),
                Reverse(record.application_id.clone()),
            )
        });
        Ok(records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
