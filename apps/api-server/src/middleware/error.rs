//! Error handling - every failure becomes a `{"error": "..."}` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::error::{DomainError, RepoError};
use blog_shared::ErrorResponse;
use std::fmt;

use crate::telemetry::LogLevelError;

/// Application-level error type mapped to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn invalid_id() -> Self {
        AppError::BadRequest("invalid id".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => ErrorResponse::new(msg),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Internal(detail) => {
                // Never leak the detail to the client
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(v) => AppError::BadRequest(v.to_string()),
            DomainError::Repository(RepoError::NotFound) => {
                AppError::NotFound(RepoError::NotFound.to_string())
            }
            DomainError::Repository(other) => AppError::Internal(other.to_string()),
        }
    }
}

impl From<LogLevelError> for AppError {
    fn from(err: LogLevelError) -> Self {
        match err {
            LogLevelError::Invalid(_) => AppError::BadRequest(err.to_string()),
            LogLevelError::Unavailable => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
