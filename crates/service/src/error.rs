//! Error responses for the HTTP service.
//!
//! Every error body has the shape `{"error": ..., "detail": ...}`.

use aggregator::AggregatorError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing something or is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Database error outside a generation run.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// A generation or agent run failed.
    #[error("Generation failed: {0}")]
    Aggregation(#[from] AggregatorError),
}

fn body(status: StatusCode, error: &str, detail: impl Into<String>) -> Response {
    let body = serde_json::json!({
        "error": error,
        "detail": detail.into(),
    });
    (status, Json(body)).into_response()
}

fn database_response(err: &DatabaseError) -> Response {
    if err.is_pool_exhausted() {
        tracing::error!("Database pool exhausted: {}", err);
        return body(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database connection pool exhausted",
            "The database service is currently experiencing high load. Please try again in a moment.",
        );
    }
    if err.is_unavailable() {
        tracing::error!("Database unavailable: {}", err);
        return body(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database connection error",
            "Unable to connect to the database. Please try again in a moment.",
        );
    }

    match err {
        DatabaseError::NotFound { entity, id } => {
            body(StatusCode::NOT_FOUND, "Not found", format!("{} {} not found", entity, id))
        }
        other => {
            tracing::error!("Database error: {}", other);
            body(StatusCode::INTERNAL_SERVER_ERROR, "Database error", other.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(msg) => body(StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            ApiError::Database(err) => database_response(err),
            ApiError::Aggregation(AggregatorError::Database(err)) => database_response(err),
            ApiError::Aggregation(AggregatorError::InvalidInput(msg)) => {
                body(StatusCode::BAD_REQUEST, msg, msg.clone())
            }
            ApiError::Aggregation(AggregatorError::Join(msg)) => {
                tracing::error!("Agent task failed: {}", msg);
                body(StatusCode::INTERNAL_SERVER_ERROR, msg, "Error running AI agents")
            }
            ApiError::Aggregation(err) => {
                tracing::error!("Recommendation generation failed: {}", err);
                if let AggregatorError::Parse { raw, .. } = err {
                    tracing::debug!("Unparseable model output: {}", raw);
                }
                body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Recommendation generation failed",
                    err.to_string(),
                )
            }
        }
    }
}

/// Result type for route handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::BadRequest("missing".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::Database(DatabaseError::NotFound {
                    entity: "employee",
                    id: "9".into(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Aggregation(AggregatorError::Join("panicked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Aggregation(AggregatorError::InvalidInput("Profession is required.".into())),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
