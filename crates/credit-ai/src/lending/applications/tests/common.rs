use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::lending::applications::domain::{
    ApplicantId, ApplicationId, ApplicationSubmission, LoanApplication,
};
use crate::lending::applications::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError,
};
use crate::lending::applications::{
    application_router, EvaluationConfig, EvaluationEngine, LoanApplicationService,
};

pub(super) const SCORE_TOLERANCE: f64 = 1e-3;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < SCORE_TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig::default()
}

pub(super) fn evaluation_engine() -> EvaluationEngine {
    EvaluationEngine::new(evaluation_config())
}

pub(super) fn application(
    income: f64,
    loan_amount: f64,
    cibil_score: u16,
    employment_years: f64,
    existing_loans: f64,
) -> LoanApplication {
    LoanApplication {
        income,
        loan_amount,
        cibil_score,
        employment_years,
        existing_loans,
    }
}

/// Salaried applicant with a good score and light obligations.
pub(super) fn strong_application() -> LoanApplication {
    application(50_000.0, 500_000.0, 750, 3.5, 10_000.0)
}

/// Fair-to-poor score with obligations exceeding the DTI ceiling.
pub(super) fn stretched_application() -> LoanApplication {
    application(30_000.0, 300_000.0, 600, 2.0, 20_000.0)
}

/// Excellent profile asking for more than five years of income.
pub(super) fn oversized_application() -> LoanApplication {
    application(50_000.0, 4_000_000.0, 780, 6.0, 5_000.0)
}

/// Sits exactly on the CIBIL floor and the DTI ceiling.
pub(super) fn boundary_application() -> LoanApplication {
    application(10_000.0, 120_000.0, 650, 1.0, 5_900.0)
}

pub(super) fn submission_for(applicant: &str, application: LoanApplication) -> ApplicationSubmission {
    ApplicationSubmission {
        applicant_id: ApplicantId(applicant.to_string()),
        income: application.income,
        loan_amount: application.loan_amount,
        cibil_score: i64::from(application.cibil_score),
        employment_years: application.employment_years,
        existing_loans: application.existing_loans,
    }
}

pub(super) fn submission() -> ApplicationSubmission {
    submission_for("applicant-001", strong_application())
}

pub(super) fn invalid_cibil_submission() -> ApplicationSubmission {
    let mut submission = submission();
    submission.cibil_score = 950;
    submission
}

pub(super) fn build_service() -> (
    LoanApplicationService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(repository.clone(), evaluation_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_applicant(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.applicant_id == applicant_id)
            .cloned()
            .collect())
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_applicant(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_applicant(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}
