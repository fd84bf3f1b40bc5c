//! Placeholder directory used when the host has not wired a backend.

use async_trait::async_trait;

use crate::directory::AccountDirectory;
use crate::domain::{Account, IdentifierMode, SecretMode, TokenIssue};
use crate::error::{AuthError, AuthResult};

/// Directory whose every operation fails with [`AuthError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredDirectory;

#[async_trait]
impl AccountDirectory for UnconfiguredDirectory {
    async fn check_account(&self, _uid: &str) -> AuthResult<Option<Account>> {
        Err(AuthError::NotImplemented("check_account"))
    }

    async fn check_credentials(
        &self,
        _uid: &str,
        _passcode: &str,
        _identifier_mode: IdentifierMode,
        _secret_mode: SecretMode,
    ) -> AuthResult<Option<Account>> {
        Err(AuthError::NotImplemented("check_credentials"))
    }

    async fn check_token(&self, _token: &str) -> AuthResult<Option<Account>> {
        Err(AuthError::NotImplemented("check_token"))
    }

    async fn create_token(&self, _account: &Account) -> AuthResult<TokenIssue> {
        Err(AuthError::NotImplemented("create_token"))
    }

    async fn send_mobile_code(&self, _uid: &str, _code: &str) -> AuthResult<()> {
        Err(AuthError::NotImplemented("send_mobile_code"))
    }

    async fn send_email_code(&self, _uid: &str, _code: &str) -> AuthResult<()> {
        Err(AuthError::NotImplemented("send_email_code"))
    }

    fn is_configured(&self) -> bool {
        false
    }
}
