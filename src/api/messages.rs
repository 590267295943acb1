use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::api::{identity, AppState};
use crate::error::{AppError, AppResult};
use crate::models::{Message, PostMessageRequest};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMessagesQuery {
    /// Cap on the number of messages returned, counted from the newest
    pub limit: Option<u32>,
}

/// Post a message. The sender is taken from the `user` header and must be a
/// registered participant.
#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    request_body = PostMessageRequest,
    params(
        ("user" = String, Header, description = "Name of the sending participant")
    ),
    responses(
        (status = 201, description = "Message stored"),
        (status = 422, description = "Invalid message or unknown sender"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PostMessageRequest>,
) -> AppResult<StatusCode> {
    req.validate().map_err(AppError::Validation)?;

    let sender = identity(&headers).ok_or_else(|| AppError::validation("missing user header"))?;

    if state.db.find_participant(&sender).await?.is_none() {
        return Err(AppError::Validation(format!(
            "sender {} is not a participant",
            sender
        )));
    }

    let message = Message::new(sender, req.to, req.text, req.kind);
    state.db.insert_message(&message).await?;

    metrics::increment_counter!("batepapo_messages_posted_total");
    info!(from = %message.sender, kind = %message.kind, "Message posted");

    Ok(StatusCode::CREATED)
}

/// List messages visible to the caller, oldest first. With `limit`, only the
/// newest `limit` visible messages are returned.
#[utoipa::path(
    get,
    path = "/messages",
    tag = "messages",
    params(
        ListMessagesQuery,
        ("user" = Option<String>, Header, description = "Caller name, widens visibility to their private messages")
    ),
    responses(
        (status = 200, description = "Visible messages", body = [Message]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<Message>>> {
    let user = identity(&headers);

    let mut visible: Vec<Message> = state
        .db
        .list_messages()
        .await?
        .into_iter()
        .filter(|m| m.visible_to(user.as_deref()))
        .collect();

    if let Some(limit) = query.limit {
        let keep_from = visible.len().saturating_sub(limit as usize);
        visible.drain(..keep_from);
    }

    Ok(Json(visible))
}
