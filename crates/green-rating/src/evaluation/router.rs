use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{EvaluationPayload, ValidationError};
use super::repository::EvaluationRepository;
use super::service::{EvaluationService, EvaluationServiceError};

/// Router builder exposing the evaluation endpoint.
pub fn evaluation_router<R>(service: Arc<EvaluationService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/evaluate", post(evaluate_handler::<R>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    payload: Result<axum::Json<EvaluationPayload>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let payload = match payload {
        Ok(axum::Json(payload)) => payload,
        Err(rejection) => {
            let error = ValidationError::MalformedBody(rejection.body_text());
            warn!(error = %error, "rejected evaluation body");
            return error_response(StatusCode::BAD_REQUEST, error.to_string());
        }
    };

    match service.evaluate(payload) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(EvaluationServiceError::Validation(error)) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        Err(EvaluationServiceError::Repository(_)) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database insert failed".to_string(),
        ),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
