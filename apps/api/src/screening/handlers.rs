use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::machine::handle_turn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Omitted on the first message; the server mints a session.
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub bot_message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub session_id: Uuid,
}

/// POST /api/v1/chat
///
/// Runs one turn of the screening conversation. Turns within a session are
/// serialized by the session-scoped lock; the session value itself is loaded
/// from and stored back to the session store around the pure turn handler.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);

    let lock = state.sessions.turn_lock(session_id);
    let _turn_guard = lock.lock().await;

    let session = state.sessions.load(session_id).await?.unwrap_or_default();
    debug!("Session {session_id} at {:?}", session.stage);

    let turn = handle_turn(
        session,
        &req.message,
        &state.validator,
        &state.generator,
        state.sink.as_ref(),
    )
    .await;

    state.sessions.save(session_id, &turn.session).await?;

    Ok(Json(ChatResponse {
        session_id,
        bot_message: turn.reply,
    }))
}

/// POST /api/v1/session/reset
///
/// Clears the stored session, returning the conversation to its pre-greeting
/// state. The front end calls this on a fresh page load.
pub async fn handle_reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<StatusCode, AppError> {
    state.sessions.clear(req.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
