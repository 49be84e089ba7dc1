use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ApplicantId, ApplicationId, ApplicationSubmission};
use super::repository::{ApplicationRepository, ApplicationStatusView, RepositoryError};
use super::service::{LoanApplicationService, LoanServiceError};

/// Router builder exposing HTTP endpoints for submission, preview, and history.
pub fn application_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/loans/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/loans/applicants/:applicant_id/applications",
            get(history_handler::<R>),
        )
        .route("/api/v1/loans/evaluate", post(preview_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.preview(&submission) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(LoanServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "application not found",
                "application_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.history(&ApplicantId(applicant_id)) {
        Ok(records) => {
            let views: Vec<ApplicationStatusView> =
                records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: LoanServiceError) -> Response {
    let (status, message) = match &error {
        LoanServiceError::Validation(validation) => {
            (StatusCode::UNPROCESSABLE_ENTITY, validation.to_string())
        }
        LoanServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "application already exists".to_string())
        }
        LoanServiceError::Repository(other) => {
            (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    };

    (status, axum::Json(json!({ "error": message }))).into_response()
}
