//! Route definitions for the API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{self, ApiState};
use crate::config::DEFAULT_ROUTE_PREFIX;
use crate::gate::GuardedRoute;
use crate::AccountGate;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::whoami,
        handlers::check_credentials,
        handlers::send_code,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::CheckCredentialsRequest,
        crate::api::types::SendCodeRequest,
        crate::api::types::SendCodeResponse,
        crate::api::types::HealthResponse,
        crate::domain::Account,
        crate::domain::TokenIssue,
        crate::domain::IdentifierMode,
        crate::domain::SecretMode,
        crate::error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "accounts", description = "Credential, code and identity endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Account Gate API",
        version = "0.1.0",
        description = "Bearer-token authentication gate",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with endpoint paths under `route_prefix`.
///
/// Handler annotations document the default prefix; gates mounted elsewhere
/// serve their actual paths.
pub fn api_doc(route_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if route_prefix == DEFAULT_ROUTE_PREFIX {
        return doc;
    }

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DEFAULT_ROUTE_PREFIX) {
            Some(rest) if rest.starts_with('/') => (format!("{route_prefix}{rest}"), item),
            _ => (path, item),
        })
        .collect();
    doc
}

/// Build the endpoint set, relative to the route prefix.
///
/// `whoami` reads the resolved account, so the returned router must sit
/// under the identity resolution layer.
pub fn build_endpoints(state: ApiState) -> Router {
    let whoami = GuardedRoute::new(get(handlers::whoami), state.directory.clone())
        .authenticate(true)
        .into_route();

    Router::new()
        .route("/common/whoami", whoami)
        .route(
            "/common/check-credentials",
            post(handlers::check_credentials),
        )
        .route("/codes/send", post(handlers::send_code))
        .with_state(state)
}

/// Build the full server router: health, gate endpoints and API docs.
pub fn build_router(gate: &AccountGate) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let host = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(gate.api_state());

    let docs = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", api_doc(gate.route_prefix()));

    gate.mount(host)
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
