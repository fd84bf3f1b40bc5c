//! Account Gate server.
//!
//! Serves the gate endpoints backed by the config-driven reference
//! directory, plus health and API docs.

use account_gate::api::build_router;
use account_gate::config::Config;
use account_gate::directory::ConfiguredDirectory;
use account_gate::logging::{self, LogFormat};
use account_gate::AccountGate;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init(LogFormat::from_env());

    tracing::info!("Starting Account Gate v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        identifier_mode = %config.gate.identifier_mode,
        secret_mode = %config.gate.secret_mode,
        route_prefix = %config.gate.route_prefix,
        "Configuration loaded"
    );

    let directory = ConfiguredDirectory::from_config(&config.directory);
    if directory.account_count() == 0 {
        tracing::warn!("No accounts configured - every credential check will fail");
    } else {
        tracing::info!(accounts = directory.account_count(), "Account directory loaded");
    }

    let gate = AccountGate::builder(directory)
        .config(config.gate.clone())
        .build()?;

    let app = build_router(&gate);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
