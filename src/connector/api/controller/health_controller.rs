use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::connector::api::router::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.container.provider_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
