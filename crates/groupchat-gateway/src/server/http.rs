//! HTTP handlers - the write path and history fetch
//!
//! The write path is the only caller of the message gateway: membership
//! check, durable append, then best-effort fan-out, in that order. A
//! message that fails to persist is never published.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use groupchat_common::AppError;
use groupchat_core::{DomainError, GroupId, Message};
use serde::Deserialize;
use validator::Validate;

use super::extract::Identity;
use super::response::ApiResult;
use super::GatewayState;

/// Request body for posting a message
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// Post a message to a group
///
/// POST /groups/{group_id}/messages
pub async fn create_message(
    State(state): State<GatewayState>,
    Identity(user_id): Identity,
    Path(group_id): Path<String>,
    Json(request): Json<CreateMessageRequest>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    request.validate()?;
    let group_id = GroupId::from(group_id);

    if request.content.trim().is_empty() {
        return Err(DomainError::EmptyContent.into());
    }
    let max = state.config().limits.max_content_len;
    if request.content.chars().count() > max {
        return Err(DomainError::ContentTooLong { max }.into());
    }

    if !state.membership().is_member(&user_id, &group_id).await? {
        return Err(AppError::NotAMember.into());
    }

    // Durable append first; fan-out only sees persisted messages
    let message = state
        .store()
        .append(&group_id, &user_id, request.content)
        .await?;

    state.gateway().publish(&message);

    tracing::info!(
        message_id = %message.id,
        group_id = %group_id,
        sender_id = %user_id,
        "Message created"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Fetch recent messages for a group, most-recent-first
///
/// GET /groups/{group_id}/messages
pub async fn get_messages(
    State(state): State<GatewayState>,
    Identity(user_id): Identity,
    Path(group_id): Path<String>,
) -> ApiResult<Json<Vec<Message>>> {
    let group_id = GroupId::from(group_id);

    if !state.membership().is_member(&user_id, &group_id).await? {
        return Err(AppError::NotAMember.into());
    }

    let messages = state
        .store()
        .recent(&group_id, state.config().limits.history_limit)
        .await?;

    Ok(Json(messages))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
