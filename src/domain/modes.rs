//! Identifier and secret modes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which credential identifies an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMode {
    /// Email address.
    Email,
    /// International phone number, digits only.
    Mobile,
}

impl std::fmt::Display for IdentifierMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierMode::Email => write!(f, "email"),
            IdentifierMode::Mobile => write!(f, "mobile"),
        }
    }
}

impl std::str::FromStr for IdentifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(IdentifierMode::Email),
            "mobile" => Ok(IdentifierMode::Mobile),
            _ => Err(format!("Unknown identifier mode: {}", s)),
        }
    }
}

/// Which secret proves ownership of the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SecretMode {
    /// Static password.
    Password,
    /// One-time passcode delivered out of band.
    Otp,
}

impl std::fmt::Display for SecretMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretMode::Password => write!(f, "password"),
            SecretMode::Otp => write!(f, "otp"),
        }
    }
}

impl std::str::FromStr for SecretMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "password" => Ok(SecretMode::Password),
            "otp" => Ok(SecretMode::Otp),
            _ => Err(format!("Unknown secret mode: {}", s)),
        }
    }
}

impl Default for IdentifierMode {
    fn default() -> Self {
        IdentifierMode::Email
    }
}

impl Default for SecretMode {
    fn default() -> Self {
        SecretMode::Password
    }
}
