//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed body returned once a one-time code has been handed to the directory.
pub const CODE_SENT_MESSAGE: &str = "OTP Sent successfully.";

// ==================== Credentials ====================

/// Credential check request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckCredentialsRequest {
    /// Email address or phone number, depending on the identifier mode.
    pub uid: String,
    /// Password or one-time code, depending on the secret mode.
    pub passcode: String,
}

// ==================== Codes ====================

/// One-time code request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendCodeRequest {
    /// Email address or phone number, depending on the identifier mode.
    pub uid: String,
}

/// One-time code response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendCodeResponse {
    pub message: String,
}

impl SendCodeResponse {
    pub fn sent() -> Self {
        Self {
            message: CODE_SENT_MESSAGE.to_string(),
        }
    }
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Whether a real account directory is wired in.
    pub directory_configured: bool,
    /// Timestamp.
    pub timestamp: String,
}
