//! HTTP request handlers.

use axum::{extract::State, Extension, Json};

use crate::api::types::*;
use crate::directory::SharedDirectory;
use crate::domain::{
    validate_passcode, validate_uid, Account, IdentifierMode, ResolvedAccount, SecretMode,
    TokenIssue,
};
use crate::error::{AuthError, AuthResult};
use crate::passcode;

/// State shared by the endpoint set.
#[derive(Clone)]
pub struct ApiState {
    pub directory: SharedDirectory,
    pub identifier_mode: IdentifierMode,
    pub secret_mode: SecretMode,
}

/// Return the account resolved for the presented token.
///
/// GET {prefix}/common/whoami
#[utoipa::path(
    get,
    path = "/accounts/common/whoami",
    responses(
        (status = 200, description = "Resolved account", body = Account),
        (status = 401, description = "Missing or expired token", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "accounts"
)]
pub async fn whoami(Extension(resolved): Extension<ResolvedAccount>) -> Json<Option<Account>> {
    Json(resolved.into_inner())
}

/// Exchange credentials for a token.
///
/// POST {prefix}/common/check-credentials
#[utoipa::path(
    post,
    path = "/accounts/common/check-credentials",
    request_body = CheckCredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenIssue),
        (status = 400, description = "Malformed uid or passcode", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn check_credentials(
    State(state): State<ApiState>,
    Json(request): Json<CheckCredentialsRequest>,
) -> AuthResult<Json<TokenIssue>> {
    validate_uid(&request.uid, state.identifier_mode)?;
    validate_passcode(&request.passcode, state.secret_mode)?;

    let account = state
        .directory
        .check_credentials(
            &request.uid,
            &request.passcode,
            state.identifier_mode,
            state.secret_mode,
        )
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                uid = %request.uid,
                identifier_mode = %state.identifier_mode,
                secret_mode = %state.secret_mode,
                "Failed credential check"
            );
            AuthError::invalid_credentials()
        })?;

    let issue = state.directory.create_token(&account).await?;

    tracing::info!(uid = %account.uid, role = %account.role, "Credentials accepted");

    Ok(Json(issue))
}

/// Generate a one-time code and hand it to the directory for delivery.
///
/// POST {prefix}/codes/send
#[utoipa::path(
    post,
    path = "/accounts/codes/send",
    request_body = SendCodeRequest,
    responses(
        (status = 200, description = "Code dispatched", body = SendCodeResponse),
        (status = 400, description = "Malformed uid", body = crate::error::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn send_code(
    State(state): State<ApiState>,
    Json(request): Json<SendCodeRequest>,
) -> AuthResult<Json<SendCodeResponse>> {
    validate_uid(&request.uid, state.identifier_mode)?;

    let code = passcode::one_time_passcode();

    match state.identifier_mode {
        IdentifierMode::Mobile => state.directory.send_mobile_code(&request.uid, &code).await?,
        IdentifierMode::Email => state.directory.send_email_code(&request.uid, &code).await?,
    }

    tracing::info!(
        uid = %request.uid,
        channel = %state.identifier_mode,
        "One-time code sent"
    );

    Ok(Json(SendCodeResponse::sent()))
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        directory_configured: state.directory.is_configured(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
