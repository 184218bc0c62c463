//! API error type and its JSON rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use taskhub_core::DomainError;

/// Single message for every rejected session, whatever the reason.
pub const INVALID_SESSION: &str = "Invalid session: session is invalid or has expired";
pub const MISSING_CREDENTIAL: &str = "Authorization header is required";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        ApiError::BadRequest(format!("Invalid request data: {}", detail))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg)
            }
            ApiError::InternalError(msg) => {
                // Details stay in the log.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCredentials | DomainError::UserNotFound => {
                ApiError::Unauthorized(err.to_string())
            }
            DomainError::Session(ref e) if e.is_invalid_session() => {
                ApiError::Unauthorized(INVALID_SESSION.to_string())
            }
            DomainError::UsernameAlreadyExists(_)
            | DomainError::EmailAlreadyExists(_)
            | DomainError::DuplicateKey(_) => ApiError::Conflict(err.to_string()),
            DomainError::TaskNotFound => ApiError::NotFound(err.to_string()),
            DomainError::ValidationError(msg) => ApiError::invalid_request(msg),
            DomainError::Session(_)
            | DomainError::PasswordHashError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
