//! Gate and identity middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::directory::SharedDirectory;
use crate::domain::ResolvedAccount;
use crate::error::AuthResult;
use crate::gate::{bearer_token, Gate};

/// State handed to [`enforce_gate`]: one gate plus the directory it consults.
#[derive(Clone)]
pub struct GateState {
    pub gate: Gate,
    pub directory: SharedDirectory,
}

/// Reject the request unless the gate passes.
pub async fn enforce_gate(
    State(state): State<GateState>,
    request: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    state
        .gate
        .enforce(request.headers(), state.directory.as_ref())
        .await?;

    Ok(next.run(request).await)
}

/// Attach the caller's account (or none) to the request extensions.
///
/// An unresolvable token is not an error here; only a failing directory
/// call fails the request.
pub async fn resolve_identity(
    State(directory): State<SharedDirectory>,
    mut request: Request<Body>,
    next: Next,
) -> AuthResult<Response> {
    let token = bearer_token(request.headers()).map(str::to_owned);

    let resolved = match token {
        Some(token) => ResolvedAccount(directory.check_token(&token).await?),
        None => ResolvedAccount::anonymous(),
    };

    if let Some(account) = resolved.account() {
        tracing::debug!(uid = %account.uid, role = %account.role, "Request identity resolved");
    }

    request.extensions_mut().insert(resolved);

    Ok(next.run(request).await)
}

/// Extension trait to read the resolved account from a request.
pub trait IdentityExtensions {
    fn resolved_account(&self) -> Option<&ResolvedAccount>;
}

impl<B> IdentityExtensions for Request<B> {
    fn resolved_account(&self) -> Option<&ResolvedAccount> {
        self.extensions().get()
    }
}
