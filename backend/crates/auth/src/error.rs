//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The `IntoResponse` impl is the single
//! place where errors become `{"error": ...}` bodies, so the two login
//! surfaces cannot disagree on wording or status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::account_status::AccountStatus;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request did not carry both credentials
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email or wrong password — deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account status forbids login; message comes from the policy table
    #[error("{message}")]
    AccountDenied {
        status: AccountStatus,
        message: &'static str,
    },

    /// Presented token failed signature or structural checks
    #[error("Invalid session token")]
    TokenInvalid,

    /// Presented token was well-signed but past its expiry
    #[error("Session has expired. Please sign in again.")]
    TokenExpired,

    /// The login call exceeded its deadline
    #[error("Login deadline exceeded")]
    Timeout,

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
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountDenied { .. } => StatusCode::FORBIDDEN,
            AuthError::TokenInvalid | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Timeout | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredentials => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired => {
                ErrorKind::Unauthorized
            }
            AuthError::AccountDenied { .. } => ErrorKind::Forbidden,
            AuthError::Timeout | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// The message serialized to the client. Server-side faults collapse to
    /// a generic body; their detail only ever reaches the logs.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Timeout | AuthError::Database(_) | AuthError::Internal(_) => {
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.client_message())
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
            AuthError::Timeout => {
                tracing::error!("Login call exceeded its deadline");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountDenied { status, .. } => {
                tracing::warn!(status = %status, "Login attempt on denied account");
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

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
