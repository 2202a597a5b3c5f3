//! Chat relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use canto_core::payload::{ChatRequest, ChatResponse};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::relay;

/// `POST /api/chat` — relay a transcript to the completion API.
///
/// The credential is checked before the body is looked at, so a misconfigured
/// server answers 500 for every request. An empty body counts as `{}`.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let api_key = relay::require_api_key(&state.config)?;

    let request: ChatRequest = if body.is_empty() {
        ChatRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let reply = relay::complete(&state, &api_key, request).await?;
    Ok(Json(ChatResponse::reply(reply)))
}

/// Any other method on `/api/chat`.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
