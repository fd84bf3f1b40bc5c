//! Error types for Account Gate.
//!
//! Every failure maps to exactly one HTTP status and one message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned when a gated request carries no usable `Authorization` header.
pub const MISSING_HEADER_MESSAGE: &str = "Authorization header not found in received request.";
/// Message returned when the directory does not resolve the presented token.
pub const EXPIRED_SESSION_MESSAGE: &str = "Your auth session has been expired.";
/// Message returned when the resolved role is outside the allowed set.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied. You are not allowed to access this resource.";
/// Message returned when the directory rejects a credential pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials provided.";

/// Unified error type for gate, endpoint and directory operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    /// Raised by the unconfigured directory for every operation.
    #[error("Directory operation `{0}` is not implemented")]
    NotImplemented(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend failure inside a directory implementation, passed through untouched.
    #[error("Directory error: {0}")]
    Directory(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn missing_header() -> Self {
        AuthError::Unauthenticated(MISSING_HEADER_MESSAGE.to_string())
    }

    pub fn session_expired() -> Self {
        AuthError::Unauthenticated(EXPIRED_SESSION_MESSAGE.to_string())
    }

    pub fn permission_denied() -> Self {
        AuthError::Forbidden(PERMISSION_DENIED_MESSAGE.to_string())
    }

    pub fn invalid_credentials() -> Self {
        AuthError::Unauthenticated(INVALID_CREDENTIALS_MESSAGE.to_string())
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AuthError::Config(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Directory(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated(_) => "UNAUTHENTICATED",
            AuthError::Forbidden(_) => "FORBIDDEN",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::NotImplemented(_) => "NOT_IMPLEMENTED",
            AuthError::Config(_) => "CONFIG_ERROR",
            AuthError::Directory(_) => "DIRECTORY_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Directory(e) => {
                tracing::error!(error = %e, "Account directory failure");
            }
            AuthError::NotImplemented(operation) => {
                tracing::error!(
                    operation = %operation,
                    "Account directory is not configured"
                );
            }
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for Account Gate operations.
pub type AuthResult<T> = Result<T, AuthError>;
