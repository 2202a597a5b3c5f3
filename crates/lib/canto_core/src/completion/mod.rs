//! Completion module: one-shot calls to an external chat-completion API.
//!
//! # Public API
//!
//! - [`CompletionClient`]: trait implemented by providers
//! - [`CompletionRequest`]: model, messages and sampling temperature
//! - [`openai::OpenAiClient`]: OpenAI-compatible `/chat/completions` client
//!
//! Every call is a single attempt. Callers decide how to surface failures.

pub mod openai;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::message::Message;

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature sent with every completion.
pub const TEMPERATURE: f32 = 0.5;

/// Errors that can occur while calling the completion API.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("{message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Completion response parse error: {0}")]
    Decode(String),
}

/// Input of a single completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Prepends `system_prompt` as a system message to `messages`.
    pub fn with_system_prompt(
        model: impl Into<String>,
        system_prompt: &str,
        messages: Vec<Message>,
    ) -> Self {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(Message::system(system_prompt));
        all.extend(messages);
        Self {
            model: model.into(),
            messages: all,
            temperature: TEMPERATURE,
        }
    }
}

/// A chat-completion provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw text of the first choice, or `None` when the provider
    /// answered without any.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, CompletionError>;
}
