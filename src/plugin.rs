//! The mountable authentication plugin.

use std::sync::Arc;

use axum::{middleware, routing::MethodRouter, Router};

use crate::api::{build_endpoints, ApiState};
use crate::config::GateConfig;
use crate::directory::{AccountDirectory, SharedDirectory};
use crate::domain::{IdentifierMode, SecretMode};
use crate::error::{AuthError, AuthResult};
use crate::gate::{resolve_identity, GuardedRoute};

/// A configured gate: modes, route prefix and the directory behind them.
///
/// Immutable once built; clone it freely, the directory is shared.
#[derive(Clone)]
pub struct AccountGate {
    config: GateConfig,
    directory: SharedDirectory,
}

/// Builder for [`AccountGate`]. The directory is mandatory.
pub struct AccountGateBuilder {
    config: GateConfig,
    directory: SharedDirectory,
}

impl AccountGate {
    pub fn builder<D>(directory: D) -> AccountGateBuilder
    where
        D: AccountDirectory + 'static,
    {
        Self::builder_shared(Arc::new(directory))
    }

    pub fn builder_shared(directory: SharedDirectory) -> AccountGateBuilder {
        AccountGateBuilder {
            config: GateConfig::default(),
            directory,
        }
    }

    pub fn identifier_mode(&self) -> IdentifierMode {
        self.config.identifier_mode
    }

    pub fn secret_mode(&self) -> SecretMode {
        self.config.secret_mode
    }

    /// Normalized prefix; empty when mounted at the root.
    pub fn route_prefix(&self) -> &str {
        &self.config.route_prefix
    }

    pub fn directory(&self) -> &SharedDirectory {
        &self.directory
    }

    /// Start declaring gates for a host route.
    pub fn guard<S>(&self, route: MethodRouter<S>) -> GuardedRoute<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        GuardedRoute::new(route, self.directory.clone())
    }

    pub fn api_state(&self) -> ApiState {
        ApiState {
            directory: self.directory.clone(),
            identifier_mode: self.config.identifier_mode,
            secret_mode: self.config.secret_mode,
        }
    }

    /// The endpoint set under the route prefix, with identity resolution.
    pub fn router(&self) -> Router {
        self.with_identity(self.endpoints())
    }

    /// Merge the endpoint set into `host` and resolve identity for every
    /// route of the result.
    ///
    /// Only routes already on `host` are covered, so mount after declaring
    /// the host's routes.
    pub fn mount(&self, host: Router) -> Router {
        self.with_identity(host.merge(self.endpoints()))
    }

    fn endpoints(&self) -> Router {
        let endpoints = build_endpoints(self.api_state());
        if self.config.route_prefix.is_empty() {
            endpoints
        } else {
            Router::new().nest(&self.config.route_prefix, endpoints)
        }
    }

    fn with_identity(&self, router: Router) -> Router {
        router.layer(middleware::from_fn_with_state(
            self.directory.clone(),
            resolve_identity,
        ))
    }
}

impl AccountGateBuilder {
    pub fn identifier_mode(mut self, mode: IdentifierMode) -> Self {
        self.config.identifier_mode = mode;
        self
    }

    pub fn secret_mode(mut self, mode: SecretMode) -> Self {
        self.config.secret_mode = mode;
        self
    }

    pub fn route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.route_prefix = prefix.into();
        self
    }

    /// Replace modes and prefix wholesale.
    pub fn config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> AuthResult<AccountGate> {
        let route_prefix = normalize_prefix(&self.config.route_prefix)?;

        if !self.directory.is_configured() {
            tracing::warn!("Account gate built without a directory - directory-backed calls will fail");
        }

        tracing::info!(
            identifier_mode = %self.config.identifier_mode,
            secret_mode = %self.config.secret_mode,
            route_prefix = %route_prefix,
            "Account gate configured"
        );

        Ok(AccountGate {
            config: GateConfig {
                route_prefix,
                ..self.config
            },
            directory: self.directory,
        })
    }
}

fn normalize_prefix(prefix: &str) -> AuthResult<String> {
    if !prefix.starts_with('/') {
        return Err(AuthError::Config(format!(
            "route prefix must start with '/': {:?}",
            prefix
        )));
    }

    let trimmed = prefix.trim_end_matches('/');
    if trimmed.contains(['{', '}', ':', '*']) {
        return Err(AuthError::Config(format!(
            "route prefix must be a literal path: {:?}",
            prefix
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::UnconfiguredDirectory;

    #[test]
    fn test_defaults() {
        let gate = AccountGate::builder(UnconfiguredDirectory).build().unwrap();
        assert_eq!(gate.identifier_mode(), IdentifierMode::Email);
        assert_eq!(gate.secret_mode(), SecretMode::Password);
        assert_eq!(gate.route_prefix(), "/accounts");
        assert!(!gate.directory().is_configured());
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(normalize_prefix("/auth/").unwrap(), "/auth");
        assert_eq!(normalize_prefix("/v1/accounts").unwrap(), "/v1/accounts");
        assert_eq!(normalize_prefix("/").unwrap(), "");
        assert!(normalize_prefix("accounts").is_err());
        assert!(normalize_prefix("").is_err());
        assert!(normalize_prefix("/:tenant").is_err());
    }

    #[test]
    fn test_builder_applies_config() {
        let gate = AccountGate::builder(UnconfiguredDirectory)
            .config(GateConfig {
                identifier_mode: IdentifierMode::Mobile,
                secret_mode: SecretMode::Otp,
                route_prefix: "/auth/".to_string(),
            })
            .build()
            .unwrap();
        assert_eq!(gate.identifier_mode(), IdentifierMode::Mobile);
        assert_eq!(gate.secret_mode(), SecretMode::Otp);
        assert_eq!(gate.route_prefix(), "/auth");
    }

    #[test]
    fn test_invalid_prefix_is_config_error() {
        let result = AccountGate::builder(UnconfiguredDirectory)
            .route_prefix("accounts")
            .build();
        assert!(matches!(result, Err(AuthError::Config(_))));
    }
}
