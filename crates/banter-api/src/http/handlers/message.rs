//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/messages?sessionId=N - The session's thread, ascending by id
//! - POST /api/messages             - One conversation turn
//!
//! Request fields use the client's camelCase (`sessionId`); response
//! bodies are snake_case domain records.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for message listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListQuery {
    pub session_id: i64,
}

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub session_id: i64,
    pub content: String,
}

/// GET /api/messages?sessionId=N - Get a session's thread.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Value>, AppError> {
    let messages = state
        .chat_service
        .list_messages(query.session_id)
        .await
        .map_err(|e| AppError::repository("Failed to fetch messages", e))?;

    Ok(Json(json!({"messages": messages})))
}

/// POST /api/messages - Persist the user message, compute the reply,
/// persist it, and return the full updated thread.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let messages = state
        .chat_service
        .send_message(body.session_id, &body.content)
        .await
        .map_err(|e| AppError::repository("Failed to send message", e))?;

    Ok(Json(json!({"messages": messages})))
}
