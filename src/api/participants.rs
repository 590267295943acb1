use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{Message, Participant, RegisterRequest, JOINED_TEXT};

/// Register a new participant and announce the join
#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Participant registered"),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Invalid name"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<StatusCode> {
    let name = req.validated_name().map_err(AppError::Validation)?;

    let now_ms = Utc::now().timestamp_millis();
    if !state.db.insert_participant(&name, now_ms).await? {
        return Err(AppError::Conflict(format!(
            "participant {} already exists",
            name
        )));
    }

    state
        .db
        .insert_message(&Message::status(&name, JOINED_TEXT))
        .await?;

    metrics::increment_counter!("batepapo_participants_registered_total");
    info!(name = %name, "Participant registered");

    Ok(StatusCode::CREATED)
}

/// List all registered participants
#[utoipa::path(
    get,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "All participants", body = [Participant]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Participant>>> {
    let participants = state.db.list_participants().await?;
    Ok(Json(participants))
}
