//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Payload failed validation
    #[error("Invalid input: {0}")]
    Validation(AppError),

    /// No resource with this id belongs to the caller
    #[error("{0}")]
    NotFound(&'static str),

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
        source: Box<ContentError>,
    },
}

impl ContentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Validation(_) => StatusCode::BAD_REQUEST,
            ContentError::NotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Database(_) | ContentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ContentError::Operation { source, .. } => source.status_code(),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Validation(err) => err.kind(),
            ContentError::NotFound(_) => ErrorKind::NotFound,
            ContentError::Database(_) | ContentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            ContentError::Operation { source, .. } => source.kind(),
        }
    }

    /// Convert to AppError
    ///
    /// Server-side variants never expose their cause.
    pub fn to_app_error(&self) -> AppError {
        match self {
            ContentError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            ContentError::NotFound(message) => AppError::not_found(*message),
            ContentError::Operation { message, .. } => AppError::new(self.kind(), *message),
            ContentError::Database(_) | ContentError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Operation { message, source } => {
                tracing::error!(error = %source, operation = %message, "Content operation failed");
            }
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ContentError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            ContentError::Internal(err.to_string())
        } else {
            ContentError::Validation(err)
        }
    }
}

/// Attach an operation message to server-side failures
pub trait ContentResultExt<T> {
    fn or_fail(self, message: &'static str) -> ContentResult<T>;
}

impl<T> ContentResultExt<T> for ContentResult<T> {
    fn or_fail(self, message: &'static str) -> ContentResult<T> {
        self.map_err(|err| {
            if err.status_code().is_server_error() {
                ContentError::Operation {
                    message,
                    source: Box::new(err),
                }
            } else {
                err
            }
        })
    }
}
