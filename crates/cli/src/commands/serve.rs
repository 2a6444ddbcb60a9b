use std::sync::Arc;

use anyhow::Result;
use hbnb_core::{DEFAULT_API_HOST, DEFAULT_API_PORT, env_parse_with_default};
use hbnb_http::{AppState, create_router};
use hbnb_storage::{Storage, StorageBackend, StorageConfig};

pub(crate) async fn run(port: Option<u16>, host: Option<String>) -> Result<()> {
    let host = host
        .unwrap_or_else(|| env_parse_with_default("HBNB_API_HOST", DEFAULT_API_HOST.to_owned()));
    let port = port.unwrap_or_else(|| env_parse_with_default("HBNB_API_PORT", DEFAULT_API_PORT));

    let config = StorageConfig::from_env();
    let mut storage = StorageBackend::open(&config)?;
    storage.reload()?;
    tracing::info!(count = storage.count(None)?, "Storage loaded");

    let state = Arc::new(AppState::new(storage));
    let router = create_router(Arc::clone(&state));
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Shutting down, closing storage");
    state.close()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
