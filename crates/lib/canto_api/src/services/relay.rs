//! Relay logic shared by the JSON endpoint and the server-rendered chat page.

use async_trait::async_trait;
use canto_core::completion::CompletionRequest;
use canto_core::payload::{ChatRequest, ChatResponse};
use canto_core::persona;
use canto_core::session::{RelayTransport, TransportError};
use tracing::{error, info};

use crate::AppState;
use crate::config::{API_KEY_VAR, ApiConfig};
use crate::error::{AppError, AppResult};

/// Resolves the completion credential or fails with a configuration error.
pub fn require_api_key(config: &ApiConfig) -> AppResult<String> {
    config
        .api_key
        .resolve()
        .ok_or_else(|| AppError::Configuration(format!("Missing {API_KEY_VAR}")))
}

/// Forwards `request` to the completion API once and returns the reply text.
///
/// The caller's system prompt wins; [`persona::DEFAULT_SYSTEM_PROMPT`] only
/// fills in when none was sent.
pub async fn complete(state: &AppState, api_key: &str, request: ChatRequest) -> AppResult<String> {
    let system_prompt = request
        .system_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(persona::DEFAULT_SYSTEM_PROMPT);

    let completion = CompletionRequest::with_system_prompt(
        state.config.model.as_str(),
        system_prompt,
        request.messages,
    );

    info!(
        model = %completion.model,
        messages = completion.messages.len(),
        "relaying chat"
    );

    match state.completion.complete(api_key, &completion).await {
        Ok(text) => Ok(text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| persona::NO_RESPONSE_REPLY.to_string())),
        Err(e) => {
            error!(error = %e, "chat completion failed");
            Err(AppError::Upstream(e.to_string()))
        }
    }
}

/// In-process transport: runs the relay without an HTTP hop.
///
/// Failures come back as an `{error}` body, the same thing a browser would
/// receive from `POST /api/chat`.
#[derive(Clone)]
pub struct LocalRelay {
    state: AppState,
}

impl LocalRelay {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl RelayTransport for LocalRelay {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let result = match require_api_key(&self.state.config) {
            Ok(key) => complete(&self.state, &key, request.clone()).await,
            Err(e) => Err(e),
        };
        Ok(match result {
            Ok(reply) => ChatResponse::reply(reply),
            Err(e) => ChatResponse::error(e.to_string()),
        })
    }
}
