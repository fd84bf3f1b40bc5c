//! JWT issuance and validation for the configured directory.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, TokenIssue};
use crate::error::{AuthError, AuthResult};

/// JWT claims carried by issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account uid).
    pub sub: String,
    /// Role at issuance time.
    pub role: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at time (Unix timestamp).
    pub iat: i64,
    /// Issuer.
    pub iss: String,
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    /// Token validity duration in minutes.
    token_duration_minutes: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret.
    pub fn new(secret: &str, issuer: String, token_duration_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            token_duration_minutes,
        }
    }

    pub fn token_duration_minutes(&self) -> i64 {
        self.token_duration_minutes
    }

    /// Sign a token for `account`.
    pub fn generate_token(&self, account: &Account) -> AuthResult<TokenIssue> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.token_duration_minutes);

        let claims = Claims {
            sub: account.uid.clone(),
            role: account.role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))?;

        Ok(TokenIssue { token, expires_at })
    }

    /// Validate and decode a JWT token.
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                AuthError::session_expired()
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret-key-12345", "account-gate".to_string(), 60);
        let account = Account::new("admin@example.com", "ignored", "admin");

        let issue = manager.generate_token(&account).unwrap();
        assert!(issue.expires_at > Utc::now() + Duration::minutes(59));

        let claims = manager.validate_token(&issue.token).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iss, "account-gate");
    }

    #[test]
    fn test_rejects_foreign_issuer_and_secret() {
        let ours = JwtManager::new("secret-one", "account-gate".to_string(), 60);
        let other_issuer = JwtManager::new("secret-one", "someone-else".to_string(), 60);
        let other_secret = JwtManager::new("secret-two", "account-gate".to_string(), 60);
        let account = Account::new("admin@example.com", "ignored", "admin");

        let token = other_issuer.generate_token(&account).unwrap().token;
        assert!(ours.validate_token(&token).is_err());

        let token = other_secret.generate_token(&account).unwrap().token;
        assert!(ours.validate_token(&token).is_err());

        assert!(ours.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        // Beyond the default 60s leeway.
        let manager = JwtManager::new("test-secret", "account-gate".to_string(), -5);
        let account = Account::new("admin@example.com", "ignored", "admin");

        let token = manager.generate_token(&account).unwrap().token;
        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(_)));
    }
}
