//! HTTP API layer for Account Gate.
//!
//! Provides the credential, code and whoami endpoints.

pub mod handlers;
mod routes;
mod types;


pub use handlers::ApiState;
pub use routes::{api_doc, build_endpoints, build_router, ApiDoc};
pub use types::*;
