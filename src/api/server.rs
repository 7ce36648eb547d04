//! API server lifecycle — bind → spawn background task → return a handle
//! with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::api::router::api_router;
use crate::catalog::DiseaseCatalog;

/// Handle to a running API server.
#[derive(Debug)]
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Bind the API server and serve it on a background tokio task.
/// Binding to port 0 picks an ephemeral port; the handle reports the actual
/// address either way.
pub async fn start_api_server(
    catalog: Arc<DiseaseCatalog>,
    addr: SocketAddr,
) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Cannot bind {addr}: {e}"))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Cannot read bound address: {e}"))?;

    let app = api_router(catalog).layer(CorsLayer::permissive());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!(error = %e, "API server exited with error");
        }
    });

    tracing::info!(addr = %addr, "API server started");
    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    #[tokio::test]
    async fn server_serves_health_and_shuts_down() {
        let catalog = Arc::new(DiseaseCatalog::builtin());
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let mut server = start_api_server(catalog, addr).await.unwrap();
        assert_ne!(server.addr.port(), 0);

        let response = raw_get(server.addr, "/api/health").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("\"status\":\"ok\""));

        server.shutdown();
        // Second shutdown is a no-op.
        server.shutdown();
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let catalog = Arc::new(DiseaseCatalog::builtin());
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = start_api_server(catalog.clone(), addr).await.unwrap();

        // Binding the same port again fails with a readable error.
        let err = start_api_server(catalog, server.addr).await.unwrap_err();
        assert!(err.contains("Cannot bind"));
    }
}
