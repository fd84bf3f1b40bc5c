//! Gate policies and the decision procedure behind them.

use std::collections::BTreeSet;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::directory::AccountDirectory;
use crate::domain::Account;
use crate::error::{AuthError, AuthResult};

/// A pre-handler check attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Require a token the directory resolves. Disabled gates always pass.
    Authenticate { enabled: bool },
    /// Require a resolvable token whose account holds one of the roles.
    Authorize { allowed_roles: BTreeSet<String> },
}

impl Gate {
    pub fn authenticate(enabled: bool) -> Self {
        Gate::Authenticate { enabled }
    }

    pub fn authorize<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Gate::Authorize {
            allowed_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the gate can ever reject a request.
    pub fn is_active(&self) -> bool {
        match self {
            Gate::Authenticate { enabled } => *enabled,
            Gate::Authorize { .. } => true,
        }
    }

    /// Run the gate against the request headers.
    ///
    /// Checks run in a fixed order: header presence, then token
    /// resolution, then role membership. The first failure wins.
    pub async fn enforce(
        &self,
        headers: &HeaderMap,
        directory: &dyn AccountDirectory,
    ) -> AuthResult<()> {
        match self {
            Gate::Authenticate { enabled: false } => Ok(()),
            Gate::Authenticate { enabled: true } => {
                authenticated_account(headers, directory).await?;
                Ok(())
            }
            Gate::Authorize { allowed_roles } => {
                let account = authenticated_account(headers, directory).await?;
                if !account.has_role(allowed_roles) {
                    tracing::warn!(
                        uid = %account.uid,
                        role = %account.role,
                        "Role not permitted for route"
                    );
                    return Err(AuthError::permission_denied());
                }
                Ok(())
            }
        }
    }
}

/// Extract the bearer token from the `Authorization` header.
///
/// Accepts both a bare token and `Bearer <token>`. Missing, non-ASCII and
/// blank values all count as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .trim_start()
        .strip_prefix("Bearer ")
        .unwrap_or(value)
        .trim();

    (!token.is_empty()).then_some(token)
}

async fn authenticated_account(
    headers: &HeaderMap,
    directory: &dyn AccountDirectory,
) -> AuthResult<Account> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!("Gated request without authorization header");
        AuthError::missing_header()
    })?;

    directory.check_token(token).await?.ok_or_else(|| {
        tracing::debug!("Gated request with unresolved token");
        AuthError::session_expired()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{FixedDirectory, UnconfiguredDirectory};
    use crate::error::{
        EXPIRED_SESSION_MESSAGE, MISSING_HEADER_MESSAGE, PERMISSION_DENIED_MESSAGE,
    };
    use axum::http::HeaderValue;

    fn directory() -> FixedDirectory {
        FixedDirectory::new(Account::new("care@mail.com", "Password@133", "admin"), "abcd")
    }

    fn headers(authorization: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_bearer_token_forms() {
        assert_eq!(bearer_token(&headers(Some("abcd"))), Some("abcd"));
        assert_eq!(bearer_token(&headers(Some("Bearer abcd"))), Some("abcd"));
        assert_eq!(bearer_token(&headers(Some("  abcd "))), Some("abcd"));
        assert_eq!(bearer_token(&headers(Some("Bearer  "))), None);
        assert_eq!(bearer_token(&headers(Some(""))), None);
        assert_eq!(bearer_token(&headers(None)), None);
    }

    #[tokio::test]
    async fn test_disabled_authenticate_never_calls_directory() {
        // The unconfigured directory would fail any call.
        let gate = Gate::authenticate(false);
        assert!(!gate.is_active());
        assert!(gate
            .enforce(&headers(None), &UnconfiguredDirectory)
            .await
            .is_ok());
        assert!(gate
            .enforce(&headers(Some("abcd")), &UnconfiguredDirectory)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_failures() {
        let gate = Gate::authenticate(true);
        let directory = directory();

        let err = gate.enforce(&headers(None), &directory).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(ref m) if m == MISSING_HEADER_MESSAGE));

        let err = gate
            .enforce(&headers(Some("stale")), &directory)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(ref m) if m == EXPIRED_SESSION_MESSAGE));

        assert!(gate.enforce(&headers(Some("abcd")), &directory).await.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_checks_role_last() {
        let directory = directory();

        let allowed = Gate::authorize(["admin", "owner"]);
        assert!(allowed.enforce(&headers(Some("abcd")), &directory).await.is_ok());

        let denied = Gate::authorize(["viewer"]);
        let err = denied
            .enforce(&headers(Some("abcd")), &directory)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(ref m) if m == PERMISSION_DENIED_MESSAGE));

        // Header and token problems are reported before the role.
        let err = denied.enforce(&headers(None), &directory).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(ref m) if m == MISSING_HEADER_MESSAGE));
        let err = denied
            .enforce(&headers(Some("stale")), &directory)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated(ref m) if m == EXPIRED_SESSION_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_role_set_denies_everyone() {
        let gate = Gate::authorize(Vec::<String>::new());
        assert!(gate.is_active());
        let err = gate
            .enforce(&headers(Some("abcd")), &directory())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_directory_errors_pass_through() {
        let gate = Gate::authenticate(true);
        let err = gate
            .enforce(&headers(Some("abcd")), &UnconfiguredDirectory)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotImplemented("check_token")));
    }
}
