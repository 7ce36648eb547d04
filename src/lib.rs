pub mod api;
pub mod catalog;
pub mod config;
pub mod kb; // pluggable fact-store backend
pub mod models;
pub mod triage; // screening, confirmation, chat sessions

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::catalog::DiseaseCatalog;

/// Process entry point: initialize tracing, load the catalog, serve the API
/// until interrupted.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Dentara starting v{}", config::APP_VERSION);

    let override_path = config::catalog_path();
    let catalog = if override_path.exists() {
        let catalog = DiseaseCatalog::load(&override_path).map_err(|e| e.to_string())?;
        tracing::info!(
            path = %override_path.display(),
            diseases = catalog.len(),
            "Loaded catalog override"
        );
        catalog
    } else {
        DiseaseCatalog::builtin()
    };

    let mut server = api::server::start_api_server(Arc::new(catalog), config::bind_addr()).await?;
    tracing::info!(addr = %server.addr, "Dentara listening");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Cannot listen for shutdown signal: {e}"))?;
    server.shutdown();
    tracing::info!("Dentara shutting down");
    Ok(())
}
