use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matching::InputError;
use crate::sources::AllSourcesFailed;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No posting source could be reached. Distinct from "nothing matched".
    #[error("Posting sources unavailable: {}", .0.join(", "))]
    SourceUnavailable(Vec<String>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<AllSourcesFailed> for AppError {
    fn from(e: AllSourcesFailed) -> Self {
        AppError::SourceUnavailable(e.failed_sources)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SourceUnavailable(sources) => {
                tracing::error!("All posting sources failed: {}", sources.join(", "));
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SOURCE_UNAVAILABLE",
                    "Couldn't reach any job source. Please try again later.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_maps_to_bad_request() {
        let response = AppError::from(InputError::NonPositiveLimit(0)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_source_unavailable_maps_to_503() {
        let err = AppError::from(AllSourcesFailed {
            failed_sources: vec!["internal".to_string()],
        });
        assert_eq!(err.to_string(), "Posting sources unavailable: internal");
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Job x not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
