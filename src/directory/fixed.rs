//! Fixed-account directory for tests and local experiments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::directory::AccountDirectory;
use crate::domain::{Account, IdentifierMode, SecretMode, TokenIssue};
use crate::error::AuthResult;

/// Default lifetime of tokens issued by [`FixedDirectory`].
pub const FIXED_TOKEN_TTL_MINUTES: i64 = 5;

/// A code handed to one of the directory's senders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    /// Channel the code went out on.
    pub channel: IdentifierMode,
    pub uid: String,
    pub code: String,
}

/// Directory that knows exactly one account and one token.
///
/// Every account and credential lookup returns the account; only the
/// configured token resolves. Dispatched codes are recorded, not delivered.
#[derive(Clone)]
pub struct FixedDirectory {
    account: Account,
    token: String,
    token_ttl: Duration,
    accept_credentials: bool,
    sent: Arc<RwLock<Vec<SentCode>>>,
}

impl FixedDirectory {
    pub fn new(account: Account, token: impl Into<String>) -> Self {
        Self {
            account,
            token: token.into(),
            token_ttl: Duration::minutes(FIXED_TOKEN_TTL_MINUTES),
            accept_credentials: true,
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Make every credential check fail.
    pub fn rejecting_credentials(mut self) -> Self {
        self.accept_credentials = false;
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Codes dispatched so far, oldest first.
    pub async fn sent_codes(&self) -> Vec<SentCode> {
        self.sent.read().await.clone()
    }

    async fn record(&self, channel: IdentifierMode, uid: &str, code: &str) {
        self.sent.write().await.push(SentCode {
            channel,
            uid: uid.to_string(),
            code: code.to_string(),
        });
    }
}

#[async_trait]
impl AccountDirectory for FixedDirectory {
    async fn check_account(&self, _uid: &str) -> AuthResult<Option<Account>> {
        Ok(Some(self.account.clone()))
    }

    async fn check_credentials(
        &self,
        _uid: &str,
        _passcode: &str,
        _identifier_mode: IdentifierMode,
        _secret_mode: SecretMode,
    ) -> AuthResult<Option<Account>> {
        Ok(self.accept_credentials.then(|| self.account.clone()))
    }

    async fn check_token(&self, token: &str) -> AuthResult<Option<Account>> {
        Ok((token == self.token).then(|| self.account.clone()))
    }

    async fn create_token(&self, _account: &Account) -> AuthResult<TokenIssue> {
        Ok(TokenIssue {
            token: self.token.clone(),
            expires_at: Utc::now() + self.token_ttl,
        })
    }

    async fn send_mobile_code(&self, uid: &str, code: &str) -> AuthResult<()> {
        self.record(IdentifierMode::Mobile, uid, code).await;
        Ok(())
    }

    async fn send_email_code(&self, uid: &str, code: &str) -> AuthResult<()> {
        self.record(IdentifierMode::Email, uid, code).await;
        Ok(())
    }
}
