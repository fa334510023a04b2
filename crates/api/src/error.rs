use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use ticketing_cache::{CacheError, ReadThroughError};
use ticketing_core::error::CoreError;

use crate::storage::StorageError;
use crate::tickets::ApprovalError;

/// Message for a request body that cannot be processed.
pub const MSG_INVALID_BODY: &str = "Nieprawidłowa treść żądania";

/// Message for a multipart form that cannot be read.
pub const MSG_INVALID_FORM: &str = "Nieprawidłowe dane formularza";

/// Message for a request body over the configured size limit.
pub const MSG_PAYLOAD_TOO_LARGE: &str = "Przesłany plik jest zbyt duży";

/// Message for any sanitized 5xx response.
pub const MSG_INTERNAL: &str = "Wystąpił błąd wewnętrzny serwera";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the infrastructure errors of
/// each backing service. Implements [`IntoResponse`] to produce a
/// `{"message": ...}` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ticketing_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A cache store failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// An object storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A ticket gateway failure.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ReadThroughError<sqlx::Error>> for AppError {
    fn from(err: ReadThroughError<sqlx::Error>) -> Self {
        match err {
            ReadThroughError::Cache(e) => Self::Cache(e),
            ReadThroughError::Query(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
                CoreError::Internal(msg) => internal("Internal core error", msg),
            },

            // --- Backing services ---
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Cache(err) => internal("Cache error", err),
            AppError::Storage(err) => internal("Object storage error", err),
            AppError::Approval(ApprovalError::Rejected) => {
                (StatusCode::BAD_REQUEST, MSG_INVALID_BODY.to_string())
            }
            AppError::Approval(err) => internal("Ticket gateway error", err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::InternalError(msg) => internal("Internal error", msg),
        };

        (status, axum::Json(json!({ "message": message }))).into_response()
    }
}

/// Log `err` and produce a sanitized 500.
fn internal(context: &str, err: &dyn std::fmt::Display) -> (StatusCode, String) {
    tracing::error!(error = %err, "{context}");
    (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            internal("Database error", db_err)
        }
        other => internal("Database error", other),
    }
}
