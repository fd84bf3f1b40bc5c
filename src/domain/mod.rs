//! Domain types for Account Gate.
//!
//! Accounts, token issuance results, authentication modes and the input
//! format rules that depend on them.

mod account;
mod modes;
mod validation;

pub use account::*;
pub use modes::*;
pub use validation::*;
