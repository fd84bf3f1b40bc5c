//! Account directory abstraction.
//!
//! The gate never owns identities. Every credential check, token
//! resolution, token issuance and code dispatch is delegated to an
//! [`AccountDirectory`] supplied by the host application.
//!
//! Implementations shipped here:
//! - [`UnconfiguredDirectory`]: fails every call with `NotImplemented`
//! - [`FixedDirectory`]: one fixed account and token, for tests
//! - [`ConfiguredDirectory`]: config-driven accounts with JWT tokens

mod configured;
mod fixed;
mod jwt;
mod unconfigured;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Account, IdentifierMode, SecretMode, TokenIssue};
use crate::error::AuthResult;

pub use configured::*;
pub use fixed::*;
pub use jwt::*;
pub use unconfigured::*;

/// Identity backend consulted by the gate.
///
/// Implementations must be safe to call from many requests at once.
/// Returning `Ok(None)` means "no such account"; returning `Err` fails the
/// current request with that error unchanged.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Look up an account by its identifier.
    async fn check_account(&self, uid: &str) -> AuthResult<Option<Account>>;

    /// Verify a uid/passcode pair under the given modes.
    async fn check_credentials(
        &self,
        uid: &str,
        passcode: &str,
        identifier_mode: IdentifierMode,
        secret_mode: SecretMode,
    ) -> AuthResult<Option<Account>>;

    /// Resolve a bearer token to its account.
    async fn check_token(&self, token: &str) -> AuthResult<Option<Account>>;

    /// Mint a token for an account that passed a credential check.
    async fn create_token(&self, account: &Account) -> AuthResult<TokenIssue>;

    /// Deliver a one-time code by SMS.
    async fn send_mobile_code(&self, uid: &str, code: &str) -> AuthResult<()>;

    /// Deliver a one-time code by email.
    async fn send_email_code(&self, uid: &str, code: &str) -> AuthResult<()>;

    /// `false` only for placeholder directories that cannot serve requests.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Directory handle shared by the gate, identity resolution and endpoints.
pub type SharedDirectory = Arc<dyn AccountDirectory>;
