use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marketrev_core::error::CoreError;

use crate::gateway::GatewayResponse;
use crate::response::ErrorBody;

/// Application-level error type for the review handler.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Converts into a [`GatewayResponse`] carrying `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `marketrev_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request method has no handler.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and client-facing message for this error.
    ///
    /// Database failures carry the underlying error text.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
        }
    }
}

impl From<AppError> for GatewayResponse {
    fn from(err: AppError) -> Self {
        let (status, message) = err.status_and_message();
        GatewayResponse::json(status, &ErrorBody { error: message })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        GatewayResponse::from(self).into_response()
    }
}
