use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::DomainError;

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors surfaced by HTTP handlers.
///
/// Only request-shape problems are reported to the client in detail; provider
/// failures are logged and answered with a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(DomainError::InvalidInput(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(DomainError::Cancelled(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Validation(msg) => {
                warn!("Rejected request: {}", msg);
                msg.clone()
            }
            Self::Domain(e) if status.is_server_error() && !e.is_cancelled() => {
                error!("Request failed: {}", e);
                "Internal Server Error".to_string()
            }
            Self::Domain(e) => {
                warn!("Request not completed: {}", e);
                e.to_string()
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422() {
        assert_eq!(
            ApiError::Validation("missing field `word`".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn provider_failure_maps_to_500() {
        let err = ApiError::from(DomainError::provider("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn cancellation_maps_to_503() {
        let err = ApiError::from(DomainError::cancelled("shutting down"));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
