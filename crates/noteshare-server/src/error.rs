//! API error types with JSON responses.
//!
//! Every error renders as `{"error": "<message>"}` with the matching
//! status code, the wire shape clients of this service expect.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use noteshare_store::StoreError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Not implemented (501).
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::PostNotFound(_)
                | StoreError::UserNotFound(_)
                | StoreError::QuizNotFound(_)
                | StoreError::NotificationNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The message sent to the client.
    ///
    /// Store failures map to fixed phrases; internals never leak.
    pub fn client_message(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotImplemented(msg) => msg.clone(),
            Self::Internal(_) => "Server error".to_string(),
            Self::Store(e) => match e {
                StoreError::PostNotFound(_) => "Post not found".to_string(),
                StoreError::UserNotFound(_) => "User not found".to_string(),
                StoreError::QuizNotFound(_) => "Quiz not found".to_string(),
                StoreError::NotificationNotFound(_) => "Notification not found".to_string(),
                StoreError::DuplicateEmail(_) => "Email already registered".to_string(),
                _ => "Server error".to_string(),
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
