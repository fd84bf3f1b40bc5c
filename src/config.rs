//! Configuration module for Account Gate.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::directory::ConfiguredAccount;
use crate::domain::{IdentifierMode, SecretMode};

/// Prefix under which the endpoint set is mounted unless configured otherwise.
pub const DEFAULT_ROUTE_PREFIX: &str = "/accounts";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub gate: GateConfig,
    pub directory: DirectoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Gate behaviour: which credential formats and where the endpoints live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub identifier_mode: IdentifierMode,
    #[serde(default)]
    pub secret_mode: SecretMode,
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

/// Settings for the config-driven reference directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// HMAC secret used to sign issued tokens.
    pub jwt_secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    #[serde(default = "default_token_duration_minutes")]
    pub token_duration_minutes: i64,
    /// How long a dispatched one-time code stays redeemable.
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,
    /// Wrong guesses after which a dispatched code is revoked.
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
    #[serde(default)]
    pub accounts: Vec<ConfiguredAccount>,
}

fn default_route_prefix() -> String {
    DEFAULT_ROUTE_PREFIX.to_string()
}

fn default_jwt_issuer() -> String {
    "account-gate".to_string()
}

fn default_token_duration_minutes() -> i64 {
    60
}

fn default_code_ttl_minutes() -> i64 {
    10
}

fn default_max_code_attempts() -> u32 {
    crate::directory::DEFAULT_MAX_CODE_ATTEMPTS
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ACCOUNT_GATE__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("ACCOUNT_GATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            identifier_mode: IdentifierMode::default(),
            secret_mode: SecretMode::default(),
            route_prefix: default_route_prefix(),
        }
    }
}
