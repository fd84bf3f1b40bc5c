//! Account and token issuance types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An account as resolved by the account directory.
///
/// The gate never stores accounts; it only passes them between the
/// directory and handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    /// Identifying credential: email address or phone number.
    pub uid: String,
    /// Secret as held by the directory (password material or one-time code).
    pub passcode: String,
    /// Single role label used for authorization checks.
    pub role: String,
}

impl Account {
    pub fn new(uid: impl Into<String>, passcode: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            passcode: passcode.into(),
            role: role.into(),
        }
    }

    /// Whether this account's role is one of `allowed`.
    pub fn has_role<I, R>(&self, allowed: I) -> bool
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        allowed.into_iter().any(|role| role.as_ref() == self.role)
    }
}

/// Result of minting a token for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenIssue {
    /// Opaque bearer token.
    pub token: String,
    /// Instant after which the directory stops accepting the token.
    pub expires_at: DateTime<Utc>,
}

/// Account attached to every request by identity resolution.
///
/// `None` means the caller is anonymous or presented a token the directory
/// did not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAccount(pub Option<Account>);

impl ResolvedAccount {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn account(&self) -> Option<&Account> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<Account> {
        self.0
    }
}
