use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hasta_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain failures and adds HTTP-specific variants.
/// Every error renders as a `{ "error": message, "code": CODE }` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hasta_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A resource identified by something other than a numeric id (slug,
    /// token) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Stable machine-readable error codes carried in response bodies.
mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

impl AppError {
    /// Resolve this error to an HTTP status, body code, and message.
    ///
    /// Store failures are logged here and surfaced with a sanitized
    /// message: write-path callers see that their operation failed (losing
    /// an edit silently is unacceptable), but never raw database detail.
    fn resolve(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                codes::NOT_FOUND,
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                codes::VALIDATION_ERROR,
                msg.clone(),
            ),
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, codes::CONFLICT, msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED, msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error()
            }
            AppError::Database(err) => resolve_sqlx_error(err),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, codes::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, codes::BAD_REQUEST, msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.resolve();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Map a sqlx error onto the HTTP surface.
///
/// `RowNotFound` becomes 404. A unique violation (Postgres 23505) on one of
/// this schema's `uq_*` constraints becomes 409, so duplicate slugs and
/// block keys surface as conflicts instead of opaque server errors. All
/// remaining store failures are 500s.
fn resolve_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                return (
                    StatusCode::CONFLICT,
                    codes::CONFLICT,
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    internal_error()
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        codes::INTERNAL_ERROR,
        "An internal error occurred".to_string(),
    )
}
