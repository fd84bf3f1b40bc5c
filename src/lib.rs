//! Account Gate - pluggable bearer-token authentication for axum.
//!
//! Mount an [`AccountGate`] on a router to get credential-check, one-time
//! code and whoami endpoints, per-request identity resolution, and
//! per-route authentication/authorization gates. Identities live in a
//! host-supplied [`AccountDirectory`].
//!
//! ```ignore
//! let gate = AccountGate::builder(my_directory)
//!     .identifier_mode(IdentifierMode::Mobile)
//!     .secret_mode(SecretMode::Otp)
//!     .build()?;
//!
//! let host = Router::new()
//!     .route("/public", get(public))
//!     .route("/reports", gate.guard(get(reports)).authorize(["admin"]).into_route());
//!
//! let app = gate.mount(host);
//! ```

pub mod api;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod gate;
pub mod logging;
pub mod passcode;
mod plugin;

pub use directory::{AccountDirectory, SharedDirectory};
pub use domain::{Account, IdentifierMode, ResolvedAccount, SecretMode, TokenIssue};
pub use error::{AuthError, AuthResult};
pub use gate::{Gate, GuardedRoute};
pub use plugin::{AccountGate, AccountGateBuilder};
