//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Two response shapes exist. Gateway and sign-in rejections keep the
//! `{ "auth": false, ... }` body that clients already parse; everything else
//! is rendered as problem JSON through `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use serde_json::json;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

pub const MSG_NO_TOKEN: &str = "No token provided.";
pub const MSG_TOKEN_REJECTED: &str = "Failed to authenticate token.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const MSG_USER_NOT_FOUND: &str = "User not found.";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request input failed value-object validation
    #[error("Invalid input: {0}")]
    Validation(AppError),

    /// Unknown email or wrong password (indistinguishable to the client)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Username or email already registered
    #[error("Duplicate {0}")]
    Conflict(&'static str),

    /// No bearer token on a gated route
    #[error("No token provided")]
    MissingToken,

    /// Bearer token present but not accepted
    #[error("Token rejected: {0}")]
    TokenRejected(TokenError),

    /// Token could not be issued
    #[error("Token issuance failed: {0}")]
    TokenIssue(TokenError),

    /// Hashing or verification could not run
    #[error("Password hashing error: {0}")]
    Password(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// A server-side failure annotated with the operation it broke
    #[error("{message}")]
    Operation {
        message: &'static str,
        #[source]
        source: Box<AuthError>,
    },
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::MissingToken => StatusCode::FORBIDDEN,
            // Clients of this API have always seen these two as 500.
            AuthError::TokenRejected(_) | AuthError::Conflict(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::TokenIssue(_)
            | AuthError::Password(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Operation { source, .. } => source.status_code(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(err) => err.kind(),
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::MissingToken => ErrorKind::Forbidden,
            AuthError::TokenRejected(_)
            | AuthError::Conflict(_)
            | AuthError::TokenIssue(_)
            | AuthError::Password(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Operation { source, .. } => source.kind(),
        }
    }

    /// Whether the failure is on the server side (and its cause must stay private)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to AppError
    ///
    /// Server-side variants never expose their cause.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            AuthError::UserNotFound => AppError::not_found(MSG_USER_NOT_FOUND),
            AuthError::Operation { message, .. } => AppError::new(self.kind(), *message),
            _ if self.is_server_error() => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Operation { message, source } => {
                tracing::error!(error = %source, operation = %message, "Auth operation failed");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Password(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::TokenIssue(e) => {
                tracing::error!(error = %e, "Token issuance failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Conflict(field) => {
                tracing::warn!(field = %field, "Duplicate account attribute");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenRejected(e) => {
                tracing::warn!(reason = %e, "Bearer token rejected");
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

        match &self {
            AuthError::MissingToken => (
                self.status_code(),
                Json(json!({ "auth": false, "message": MSG_NO_TOKEN })),
            )
                .into_response(),
            AuthError::TokenRejected(_) => (
                self.status_code(),
                Json(json!({ "auth": false, "message": MSG_TOKEN_REJECTED })),
            )
                .into_response(),
            AuthError::InvalidCredentials => (
                self.status_code(),
                Json(json!({
                    "auth": false,
                    "token": null,
                    "message": MSG_INVALID_CREDENTIALS,
                })),
            )
                .into_response(),
            _ => self.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}

/// Attach an operation message to server-side failures
///
/// Client errors (not found, bad input, bad credentials) pass through
/// unchanged so their own status and body survive.
pub trait AuthResultExt<T> {
    fn or_fail(self, message: &'static str) -> AuthResult<T>;
}

impl<T> AuthResultExt<T> for AuthResult<T> {
    fn or_fail(self, message: &'static str) -> AuthResult<T> {
        self.map_err(|err| {
            if err.is_server_error() && !matches!(err, AuthError::TokenRejected(_)) {
                AuthError::Operation {
                    message,
                    source: Box::new(err),
                }
            } else {
                err
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_statuses() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::TokenRejected(TokenError::Expired).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_is_server_error() {
        let err = AuthError::Conflict("email");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_validation_keeps_message() {
        let err: AuthError = AppError::bad_request("Email cannot be empty").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_app_error().message(), "Email cannot be empty");
    }

    #[test]
    fn test_internal_cause_is_hidden() {
        let err = AuthError::Internal("connection refused at 10.0.0.1".to_string());
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }

    #[test]
    fn test_or_fail_wraps_server_errors_only() {
        let failed: AuthResult<()> = Err(AuthError::Conflict("username"));
        let err = failed.or_fail("Error signing up user.").unwrap_err();
        assert!(matches!(err, AuthError::Operation { .. }));
        assert_eq!(err.to_app_error().message(), "Error signing up user.");

        let missing: AuthResult<()> = Err(AuthError::UserNotFound);
        let err = missing.or_fail("Error fetching user.").unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[test]
    fn test_token_rejection_is_not_wrapped() {
        let rejected: AuthResult<()> = Err(AuthError::TokenRejected(TokenError::BadSignature));
        let err = rejected.or_fail("Error fetching user.").unwrap_err();
        assert!(matches!(err, AuthError::TokenRejected(_)));
    }
}
