//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Each variant maps
//! to an HTTP status plus a stable machine-readable code; internals
//! (database messages, sources) never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldError},
    kind::ErrorKind,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found (unknown email at login, or deleted since session creation)
    #[error("User not found")]
    NotFoundUser,

    /// Email already registered
    #[error("Email is already in use")]
    DuplicateEmail,

    /// Nickname already taken
    #[error("Nickname is already in use")]
    DuplicateNickname,

    /// Password mismatch at login
    #[error("Password does not match")]
    InvalidPassword,

    /// No session, invalid token, or expired session
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated but lacking the required role
    #[error("Access denied")]
    Forbidden,

    /// Concurrent-session limit reached and policy refuses new logins
    #[error("Maximum number of concurrent sessions reached")]
    SessionLimitReached,

    /// Request body failed the explicit validation pass
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotFoundUser => StatusCode::NOT_FOUND,
            AuthError::DuplicateEmail | AuthError::DuplicateNickname => StatusCode::CONFLICT,
            AuthError::InvalidPassword | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::SessionLimitReached => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotFoundUser => ErrorKind::NotFound,
            AuthError::DuplicateEmail
            | AuthError::DuplicateNickname
            | AuthError::SessionLimitReached => ErrorKind::Conflict,
            AuthError::InvalidPassword | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NotFoundUser => "NOT_FOUND_USER",
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::DuplicateNickname => "DUPLICATE_NICKNAME",
            AuthError::InvalidPassword => "INVALID_PASSWORD",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::SessionLimitReached => "SESSION_LIMIT_EXCEEDED",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to AppError
    ///
    /// Server-side errors are flattened to a generic message; the detail
    /// stays in the logs only.
    pub fn to_app_error(&self) -> AppError {
        let base = match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        };

        let base = base.with_code(self.code());

        match self {
            AuthError::Validation(errors) => base.with_field_errors(errors.clone()),
            _ => base,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidPassword | AuthError::NotFoundUser => {
                tracing::warn!("Failed login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Access denied by authorization gate");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
