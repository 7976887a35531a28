use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::connector::api::router::AppState;
use crate::connector::api::ApiError;
use crate::{ExplanationRequest, ExplanationResult};

/// `POST /explain`
///
/// The body is validated before the provider is touched: a missing or
/// non-string `word`/`context` (or a body that is not JSON at all) is a 422.
/// An explanation that stayed empty through every attempt is still a 200.
pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplanationRequest>, JsonRejection>,
) -> Result<Json<ExplanationResult>, ApiError> {
    let Json(request) = payload?;

    // Dropping the guard (handler finished or future dropped on disconnect)
    // cancels this request's retry loop.
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let explanation = state
        .container
        .explain_use_case()
        .execute_with_cancellation(&request, &cancel)
        .await?;

    Ok(Json(explanation.into()))
}
