//! Request deadline

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Answer with a 504 envelope when the inner service runs past `request_timeout`.
/// The pending handler future is dropped, which also cancels its provider calls.
pub async fn enforce_deadline(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(state.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%method, path, timeout = ?state.request_timeout, "request timed out");
            ApiError::Timeout.into_response()
        }
    }
}
