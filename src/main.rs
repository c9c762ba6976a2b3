//! InkInSpot: tattoo image search
//!
//! This is the main entry point for the application.

use anyhow::Result;
use inkinspot::{
    config,
    stores::StoreLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting InkInSpot v{}", inkinspot::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!(
        "Search budgets: request {}ms, vector store {}ms, image store {}ms",
        settings.search.request_timeout_ms,
        settings.search.vector_store_timeout_ms,
        settings.search.image_store_timeout_ms
    );

    // Load stores
    let (vectors, images) = StoreLoader::load(&settings)?;

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    // Create application state and router
    let state = AppState::new(settings, Arc::new(vectors), Arc::new(images));
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
