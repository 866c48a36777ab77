//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode};
use vigia_core::ports::AuthError;
use vigia_core::{DomainError, RepoError};
use vigia_shared::{ErrorCode, ErrorResponse};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server misconfigured")]
    Misconfigured,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::InvalidAction(_) => ErrorCode::InvalidAction,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Misconfigured => ErrorCode::ServerMisconfigured,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let error = ErrorResponse::new(self.code());
        let error = match self {
            AppError::InvalidInput(detail)
            | AppError::InvalidAction(detail)
            | AppError::Unauthorized(detail)
            | AppError::Forbidden(detail)
            | AppError::NotFound(detail) => error.with_detail(detail.clone()),
            AppError::Misconfigured => {
                error.with_detail("Moderation is not available on this server")
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                error.with_detail("An unexpected error occurred")
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::InvalidInput { .. } => AppError::InvalidInput(err.to_string()),
            DomainError::InvalidAction(_) => AppError::InvalidAction(err.to_string()),
            DomainError::Repository(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Post not found".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential
            | AuthError::MalformedCredential
            | AuthError::InvalidCredential => AppError::Unauthorized(err.to_string()),
            AuthError::UntrustedOrigin => AppError::Forbidden(err.to_string()),
            AuthError::NotConfigured => AppError::Misconfigured,
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Maps body deserialization failures onto `invalid_input`.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(format!("malformed request body: {err}")).into()
}

/// Maps query string failures onto `invalid_input`.
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(format!("malformed query string: {err}")).into()
}
