//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/sessions      - List sessions, newest first
//! - POST   /api/sessions      - Create a session (optional name)
//! - DELETE /api/sessions/{id} - Delete a session and its messages

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for session creation.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub name: Option<String>,
}

/// GET /api/sessions - List all sessions, newest-created first.
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sessions = state
        .chat_service
        .list_sessions()
        .await
        .map_err(|e| AppError::repository("Failed to fetch sessions", e))?;

    Ok(Json(json!({"sessions": sessions})))
}

/// POST /api/sessions - Create a session. A blank name is stored as absent.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session = state
        .chat_service
        .create_session(body.name.as_deref())
        .await
        .map_err(|e| AppError::repository("Failed to create session", e))?;

    Ok((StatusCode::CREATED, Json(json!({"session": session}))))
}

/// DELETE /api/sessions/{id} - Delete a session and its messages.
///
/// Acknowledges success whether or not the id existed.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state
        .chat_service
        .delete_session(session_id)
        .await
        .map_err(|e| AppError::repository("Failed to delete session", e))?;

    Ok(Json(json!({"success": true})))
}
