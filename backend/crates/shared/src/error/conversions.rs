//! Error conversions - From implementations for common error types
//!
//! Conversion of request-body rejections to [`AppError`], and the HTTP
//! rendering of [`AppError`].

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// A body that could not be read as the expected JSON is a 400. The
/// deserializer's message stays in the source and is never rendered.
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        use axum::extract::rejection::JsonRejection;

        let message = match &rejection {
            JsonRejection::JsonDataError(_) => {
                "Request body is missing a required field or has a field of the wrong type"
            }
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`"
            }
            _ => "Failed to read request body",
        };

        AppError::bad_request(message).with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
