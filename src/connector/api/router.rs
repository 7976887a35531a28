use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::container::Container;
use super::controller::{explain, health};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
    /// Parent of each request's cancellation token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

pub fn build_router(
    container: Arc<Container>,
    config: &HttpServerConfig,
    shutdown: CancellationToken,
) -> Result<Router> {
    let state = AppState {
        container,
        shutdown,
    };

    Ok(Router::new()
        .route("/explain", post(explain))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}

/// Credentials cannot be combined with `*` wildcards, so "any" is expressed by
/// echoing the request's origin, method and headers back.
fn cors_layer(config: &HttpServerConfig) -> Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.allowed_origins()?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
