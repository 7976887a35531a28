//! HTTP server: binds the listener and serves the router until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::config::HttpServerConfig;
use super::container::Container;
use super::router::build_router;

pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    shutdown: CancellationToken,
}

impl HttpServer {
    pub fn new(container: Arc<Container>, config: HttpServerConfig) -> Result<Self> {
        let shutdown = CancellationToken::new();
        let router = build_router(container, &config, shutdown.clone())?;
        Ok(Self {
            config,
            router,
            shutdown,
        })
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Token that stops the server, and every in-flight retry loop, when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .with_context(|| format!("invalid bind address {}", self.config.socket_addr()))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        info!("Listening on http://{}", addr);
        info!("  POST /explain  - explain a word in context");
        info!("  GET  /health   - liveness and provider name");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(self.shutdown.cancelled_owned())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
