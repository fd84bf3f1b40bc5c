//! Gate engine for Account Gate.
//!
//! - Gate policies: Authenticate(enabled) and Authorize(roles), enforced
//!   per route before the handler runs
//! - Identity resolution: attaches the caller's account, or none, to
//!   every request without ever rejecting it
//! - Guarded routes: builder attaching ordered gates to a route

mod middleware;
mod policy;
mod route;

pub use middleware::*;
pub use policy::*;
pub use route::*;
