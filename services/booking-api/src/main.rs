use std::sync::Arc;

use booking_api::{clients::DirectoryClient, routes::create_router, AppState, Config};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration; missing directory credentials stop the process here
    let config = Config::from_env().map_err(|e| {
        tracing::error!("Configuration error: {:#}", e);
        e
    })?;

    let directory = DirectoryClient::new(&config)?;
    tracing::info!(
        "Directory API at {} (corp {})",
        config.directory_api_base,
        config.corp_id
    );

    let addr = config.bind_addr();
    let development = config.is_development();

    // Create application state and router
    let state = AppState::new(config, Arc::new(directory));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Server listening on {} ({} mode)",
        addr,
        if development { "development" } else { "production" }
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
