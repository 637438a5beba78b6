//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Errors are rendered as JSON envelopes:
//!
//! ```text
//! {"error": {"Not Found": "Sorry, ..."}}   // labelled variants
//! {"error": "Sorry, that's not allowed..."} // Forbidden
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the cafe server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Credential missing or wrong.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON wrapper for every error body.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: Value,
}

impl AppError {
    /// HTTP status this error maps to under conventional semantics.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error with an explicit status code.
    ///
    /// Used by routes that keep answering `200 OK` for logical failures so
    /// existing clients keep working.
    #[must_use]
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        let mut response = self.into_response();
        *response.status_mut() = status;
        response
    }

    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_)
        )
    }

    fn body(&self) -> ErrorEnvelope {
        let error = match self {
            // Don't expose internal error details to clients
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_) => {
                json!({ "Internal Server Error": "Internal server error" })
            }
            Self::Database(RepositoryError::NotFound) => json!({ "Not Found": "Not found" }),
            Self::Database(RepositoryError::Conflict(msg)) | Self::Conflict(msg) => {
                json!({ "Conflict": msg })
            }
            Self::NotFound(msg) => json!({ "Not Found": msg }),
            Self::BadRequest(msg) => json!({ "Bad Request": msg }),
            Self::Forbidden(msg) => Value::String(msg.clone()),
        };
        ErrorEnvelope { error }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("cafe 12".to_string());
        assert_eq!(err.to_string(), "Not found: cafe 12");

        let err = AppError::BadRequest("missing field: name".to_string());
        assert_eq!(err.to_string(), "Bad request: missing field: name");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict("dup".into()))),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn test_labelled_error_body() {
        let body = body_json(AppError::NotFound("no cafe".to_string()).into_response()).await;
        assert_eq!(body, json!({ "error": { "Not Found": "no cafe" } }));
    }

    #[tokio::test]
    async fn test_forbidden_body_is_plain_string() {
        let body = body_json(AppError::Forbidden("wrong key".to_string()).into_response()).await;
        assert_eq!(body, json!({ "error": "wrong key" }));
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".to_string()).into_response();
        let body = body_json(response).await;
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn test_into_response_with_status_overrides_status() {
        let response = AppError::NotFound("gone".to_string())
            .into_response_with_status(StatusCode::OK);
        assert_eq!(response.status(), StatusCode::OK);
    }
}
