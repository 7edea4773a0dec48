//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::PorticoConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes::create_router;
use crate::state::AppState;

/// The Portico API server: registry, discovery, and gateway endpoints
/// over one shared in-memory registry.
#[derive(Debug, Clone)]
pub struct PorticoServer {
    state: Arc<AppState>,
}

impl PorticoServer {
    /// Create a server from configuration.
    #[must_use]
    pub fn new(config: PorticoConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Create a server over pre-built state.
    #[must_use]
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Get the shared state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Start the server and listen for connections.
    ///
    /// Runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ApiResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Portico server listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server shuts down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Portico server listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!("Portico server shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_discovery::ServiceRegistration;

    fn make_test_server() -> PorticoServer {
        PorticoServer::new(PorticoConfig::default())
    }

    #[test]
    fn test_server_creation() {
        let server = make_test_server();
        assert!(server.state().registry().is_empty());
    }

    #[test]
    fn test_server_clone_shares_state() {
        let server = make_test_server();
        let cloned = server.clone();

        server
            .state()
            .registry()
            .register(ServiceRegistration::new("svc-a", "translation", "http://a"))
            .unwrap();

        assert_eq!(cloned.state().registry().len(), 1);
    }

    #[tokio::test]
    async fn test_router_creation() {
        let server = make_test_server();
        let _router = server.router();
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = make_test_server();
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());

        let result =
            tokio::time::timeout(std::time::Duration::from_secs(1), server_handle).await;
        assert!(result.is_ok());
    }
}
