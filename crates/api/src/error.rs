use anidex_core::error::CoreError;
use anidex_db::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent
/// `{ "error": CODE, "message": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `anidex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage or service error from `anidex_db`.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The request could not be read: malformed body, missing field or a
    /// path parameter of the wrong type.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) | AppError::Db(DbError::Core(core)) => classify_core_error(core),
            AppError::Db(err) => classify_db_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": code,
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::InvalidReference {
            field,
            entity,
            value: Some(value),
        } => (
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            format!("{field} {value} does not reference an existing {entity}"),
        ),
        CoreError::InvalidReference {
            field,
            entity,
            value: None,
        } => (
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            format!("{field} is required and must reference an existing {entity}"),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a storage error into an HTTP status, error code, and message.
///
/// - Write conflicts map to 409 so the client can retry.
/// - Unreadable or corrupt backing files map to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::Core(core) => classify_core_error(core),
        DbError::WriteConflict { .. } => {
            tracing::warn!(error = %err, "Write conflict");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                "The collection was modified concurrently, retry the request".to_string(),
            )
        }
        DbError::StorageUnavailable { .. } | DbError::CorruptData { .. } => {
            tracing::error!(error = %err, "Storage error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
