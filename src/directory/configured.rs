//! Reference directory backed by configuration.
//!
//! Accounts come from the config file, passwords are compared as SHA-256
//! hex digests, tokens are HS256 JWTs and one-time codes live in memory
//! until redeemed or expired. Code delivery is a log line; there is no
//! SMS or mail transport.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::config::DirectoryConfig;
use crate::directory::{AccountDirectory, JwtManager};
use crate::domain::{Account, IdentifierMode, SecretMode, TokenIssue};
use crate::error::AuthResult;

/// Account entry from the config file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ConfiguredAccount {
    /// Email address or phone number.
    pub uid: String,
    /// Password hash (SHA256 hex). Absent for OTP-only accounts.
    #[serde(default)]
    pub password_hash: Option<String>,
    pub role: String,
}

impl ConfiguredAccount {
    /// Verify a password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| hash == hash_secret(password))
    }

    /// The account as handed to callers. The stored hash stays here.
    fn to_account(&self) -> Account {
        Account::new(self.uid.clone(), String::new(), self.role.clone())
    }
}

/// Hash a secret for storage/comparison.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Wrong guesses tolerated before an outstanding code is revoked.
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
struct PendingCode {
    code: String,
    expires_at: DateTime<Utc>,
    failed_attempts: u32,
}

/// Directory serving the accounts listed in [`DirectoryConfig`].
#[derive(Clone)]
pub struct ConfiguredDirectory {
    accounts: HashMap<String, ConfiguredAccount>,
    jwt_manager: JwtManager,
    code_ttl: Duration,
    max_code_attempts: u32,
    /// Outstanding one-time codes keyed by uid.
    codes: Arc<RwLock<HashMap<String, PendingCode>>>,
}

impl ConfiguredDirectory {
    pub fn new(accounts: Vec<ConfiguredAccount>, jwt_manager: JwtManager, code_ttl: Duration) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.uid.clone(), account))
            .collect();

        Self {
            accounts,
            jwt_manager,
            code_ttl,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        let jwt_manager = JwtManager::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.token_duration_minutes,
        );
        Self::new(
            config.accounts.clone(),
            jwt_manager,
            Duration::minutes(config.code_ttl_minutes),
        )
        .with_max_code_attempts(config.max_code_attempts)
    }

    /// Revoke an outstanding code after this many wrong guesses. Clamped to
    /// at least one.
    pub fn with_max_code_attempts(mut self, max_code_attempts: u32) -> Self {
        self.max_code_attempts = max_code_attempts.max(1);
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Redeem the outstanding code for `uid`. A matching code is consumed,
    /// an expired one is dropped, and a code that has absorbed
    /// `max_code_attempts` wrong guesses is revoked.
    async fn redeem_code(&self, uid: &str, code: &str) -> bool {
        let mut codes = self.codes.write().await;
        let Some(pending) = codes.get_mut(uid) else {
            return false;
        };

        if pending.expires_at <= Utc::now() {
            codes.remove(uid);
            return false;
        }

        if pending.code != code {
            pending.failed_attempts += 1;
            if pending.failed_attempts >= self.max_code_attempts {
                codes.remove(uid);
                tracing::warn!(uid = %uid, "One-time code revoked after repeated wrong guesses");
            }
            return false;
        }

        codes.remove(uid);
        true
    }

    async fn issue_code(&self, channel: IdentifierMode, uid: &str, code: &str) {
        if !self.accounts.contains_key(uid) {
            tracing::warn!(channel = %channel, "One-time code requested for unknown account");
            return;
        }

        let expires_at = Utc::now() + self.code_ttl;
        self.codes.write().await.insert(
            uid.to_string(),
            PendingCode {
                code: code.to_string(),
                expires_at,
                failed_attempts: 0,
            },
        );

        tracing::info!(uid = %uid, channel = %channel, expires_at = %expires_at, "One-time code dispatched");
        tracing::debug!(uid = %uid, code = %code, "One-time code value");
    }
}

#[async_trait]
impl AccountDirectory for ConfiguredDirectory {
    async fn check_account(&self, uid: &str) -> AuthResult<Option<Account>> {
        Ok(self.accounts.get(uid).map(ConfiguredAccount::to_account))
    }

    async fn check_credentials(
        &self,
        uid: &str,
        passcode: &str,
        _identifier_mode: IdentifierMode,
        secret_mode: SecretMode,
    ) -> AuthResult<Option<Account>> {
        let Some(configured) = self.accounts.get(uid) else {
            return Ok(None);
        };

        let verified = match secret_mode {
            SecretMode::Password => configured.verify_password(passcode),
            SecretMode::Otp => self.redeem_code(uid, passcode).await,
        };

        Ok(verified.then(|| configured.to_account()))
    }

    async fn check_token(&self, token: &str) -> AuthResult<Option<Account>> {
        let Ok(claims) = self.jwt_manager.validate_token(token) else {
            return Ok(None);
        };

        Ok(self.accounts.get(&claims.sub).map(ConfiguredAccount::to_account))
    }

    async fn create_token(&self, account: &Account) -> AuthResult<TokenIssue> {
        let issue = self.jwt_manager.generate_token(account)?;

        tracing::info!(
            uid = %account.uid,
            role = %account.role,
            expires_at = %issue.expires_at,
            "Token issued"
        );

        Ok(issue)
    }

    async fn send_mobile_code(&self, uid: &str, code: &str) -> AuthResult<()> {
        self.issue_code(IdentifierMode::Mobile, uid, code).await;
        Ok(())
    }

    async fn send_email_code(&self, uid: &str, code: &str) -> AuthResult<()> {
        self.issue_code(IdentifierMode::Email, uid, code).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with_ttl(code_ttl: Duration) -> ConfiguredDirectory {
        let accounts = vec![
            ConfiguredAccount {
                uid: "admin@example.com".to_string(),
                password_hash: Some(hash_secret("password123")),
                role: "admin".to_string(),
            },
            ConfiguredAccount {
                uid: "919876543210".to_string(),
                password_hash: None,
                role: "member".to_string(),
            },
        ];
        let jwt_manager = JwtManager::new("test-secret-key", "account-gate".to_string(), 60);
        ConfiguredDirectory::new(accounts, jwt_manager, code_ttl)
    }

    fn directory() -> ConfiguredDirectory {
        directory_with_ttl(Duration::minutes(10))
    }

    #[tokio::test]
    async fn test_password_credentials() {
        let directory = directory();

        let account = directory
            .check_credentials("admin@example.com", "password123", IdentifierMode::Email, SecretMode::Password)
            .await
            .unwrap()
            .expect("valid credentials resolve");
        assert_eq!(account.role, "admin");

        // Wrong password
        assert!(directory
            .check_credentials("admin@example.com", "wrong-password", IdentifierMode::Email, SecretMode::Password)
            .await
            .unwrap()
            .is_none());

        // Unknown account
        assert!(directory
            .check_credentials("unknown@example.com", "password123", IdentifierMode::Email, SecretMode::Password)
            .await
            .unwrap()
            .is_none());

        // OTP-only account has no password
        assert!(directory
            .check_credentials("919876543210", "password123", IdentifierMode::Mobile, SecretMode::Password)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let directory = directory();
        let account = directory.check_account("admin@example.com").await.unwrap().unwrap();

        let issue = directory.create_token(&account).await.unwrap();
        let resolved = directory.check_token(&issue.token).await.unwrap();
        assert_eq!(resolved, Some(account));

        assert!(directory.check_token("garbage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_otp_is_single_use() {
        let directory = directory();
        directory.send_mobile_code("919876543210", "123456").await.unwrap();

        // Wrong code leaves the pending one in place.
        assert!(directory
            .check_credentials("919876543210", "000000", IdentifierMode::Mobile, SecretMode::Otp)
            .await
            .unwrap()
            .is_none());

        let account = directory
            .check_credentials("919876543210", "123456", IdentifierMode::Mobile, SecretMode::Otp)
            .await
            .unwrap();
        assert_eq!(account.map(|a| a.role), Some("member".to_string()));

        assert!(directory
            .check_credentials("919876543210", "123456", IdentifierMode::Mobile, SecretMode::Otp)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_expired_otp_is_rejected() {
        let directory = directory_with_ttl(Duration::minutes(-1));
        directory.send_email_code("admin@example.com", "123456").await.unwrap();

        assert!(directory
            .check_credentials("admin@example.com", "123456", IdentifierMode::Email, SecretMode::Otp)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_codes_for_unknown_accounts_are_not_stored() {
        let directory = directory();
        directory.send_email_code("ghost@example.com", "123456").await.unwrap();
        assert!(directory.codes.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_otp_revoked_after_max_wrong_guesses() {
        let directory = directory().with_max_code_attempts(3);
        directory.send_mobile_code("919876543210", "123456").await.unwrap();

        for guess in ["000000", "000001", "000002"] {
            assert!(directory
                .check_credentials("919876543210", guess, IdentifierMode::Mobile, SecretMode::Otp)
                .await
                .unwrap()
                .is_none());
        }

        // The right code no longer works once the budget is spent.
        assert!(directory
            .check_credentials("919876543210", "123456", IdentifierMode::Mobile, SecretMode::Otp)
            .await
            .unwrap()
            .is_none());
        assert!(directory.codes.read().await.is_empty());

        // A fresh dispatch starts a new budget.
        directory.send_mobile_code("919876543210", "654321").await.unwrap();
        assert!(directory
            .check_credentials("919876543210", "654321", IdentifierMode::Mobile, SecretMode::Otp)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_resolved_accounts_do_not_expose_password_hash() {
        let directory = directory();

        let account = directory.check_account("admin@example.com").await.unwrap().unwrap();
        assert!(account.passcode.is_empty());

        let account = directory
            .check_credentials("admin@example.com", "password123", IdentifierMode::Email, SecretMode::Password)
            .await
            .unwrap()
            .unwrap();
        assert!(account.passcode.is_empty());

        let issue = directory.create_token(&account).await.unwrap();
        let resolved = directory.check_token(&issue.token).await.unwrap().unwrap();
        assert!(resolved.passcode.is_empty());
    }
}
