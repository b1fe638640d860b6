//! Main entry point for the Runware Media Gateway

use runware_gateway::{
    api,
    config::Settings,
    gateway::MediaGateway,
    provider::{Connector, ProviderConnection, RunwareConnector},
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .init();

    info!("Starting Runware Media Gateway");

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;
    info!(
        api_key_configured = settings.provider.resolve_api_key().is_ok(),
        "Loaded configuration: server={}:{}",
        settings.server.host,
        settings.server.port
    );

    // Compose the provider gateway; the connection itself is established
    // lazily on first use
    let connector = Arc::new(RunwareConnector::new(settings.provider.clone()));
    let capabilities = connector.capabilities();
    let connection = Arc::new(ProviderConnection::new(connector));
    let gateway = MediaGateway::new(connection, capabilities);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Create application state and router
    let app_state = AppState::new(settings, gateway);
    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
