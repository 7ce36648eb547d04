//! Chat session endpoints.
//!
//! - `POST /api/sessions` — open a session (returns the greeting)
//! - `POST /api/sessions/:id/messages` — one patient message, returns replies
//! - `GET /api/sessions/:id` — full transcript
//! - `DELETE /api/sessions/:id` — end a session

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::triage::session::TranscriptEntry;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub greeting: String,
}

/// `POST /api/sessions` — open a new triage conversation.
pub async fn create(
    State(ctx): State<ApiContext>,
) -> Result<Json<SessionCreatedResponse>, ApiError> {
    let (session_id, greeting) = ctx.sessions.create(ctx.catalog.clone())?;
    Ok(Json(SessionCreatedResponse {
        session_id,
        greeting,
    }))
}

#[derive(Deserialize)]
pub struct SessionMessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct SessionMessageResponse {
    pub session_id: Uuid,
    pub replies: Vec<String>,
}

/// `POST /api/sessions/:id/messages` — advance the conversation one turn.
pub async fn message(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SessionMessageRequest>,
) -> Result<Json<SessionMessageResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".into()));
    }
    if req.message.len() > 2000 {
        return Err(ApiError::BadRequest(
            "Message too long (max 2000 chars)".into(),
        ));
    }

    let replies = ctx.sessions.message(&session_id, req.message.trim())?;
    Ok(Json(SessionMessageResponse {
        session_id,
        replies,
    }))
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub messages: Vec<TranscriptEntry>,
}

/// `GET /api/sessions/:id` — full conversation history.
pub async fn transcript(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let messages = ctx.sessions.transcript(&session_id)?;
    Ok(Json(TranscriptResponse {
        session_id,
        messages,
    }))
}

/// `DELETE /api/sessions/:id` — end a session and drop its state.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.sessions.remove(&session_id)?;
    Ok(StatusCode::NO_CONTENT)
}
