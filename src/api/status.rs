use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use chrono::Utc;
use tracing::debug;

use crate::api::{identity, AppState};
use crate::error::{AppError, AppResult};

/// Heartbeat: refresh the caller's activity timestamp so the inactivity
/// sweep keeps them in the room.
#[utoipa::path(
    post,
    path = "/status",
    tag = "status",
    params(
        ("user" = String, Header, description = "Name of the participant pinging")
    ),
    responses(
        (status = 200, description = "Timestamp refreshed"),
        (status = 404, description = "Unknown participant"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn heartbeat(State(state): State<AppState>, headers: HeaderMap) -> AppResult<StatusCode> {
    let user = identity(&headers).ok_or_else(|| AppError::not_found("missing user header"))?;

    let now_ms = Utc::now().timestamp_millis();
    if !state.db.touch_participant(&user, now_ms).await? {
        return Err(AppError::NotFound(format!(
            "participant {} not found",
            user
        )));
    }

    debug!(name = %user, "Heartbeat received");

    Ok(StatusCode::OK)
}
