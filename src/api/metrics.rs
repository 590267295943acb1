use axum::extract::State;
use axum::response::IntoResponse;

use crate::api::AppState;

/// Prometheus metrics endpoint. Renders the installed recorder; test setups
/// build state without one and get an empty exposition.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String),
    )
)]
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    ([("content-type", "text/plain; charset=utf-8")], body)
}
