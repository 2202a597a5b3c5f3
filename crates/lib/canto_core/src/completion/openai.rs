//! OpenAI chat-completion provider.
//!
//! Calls `{base_url}/chat/completions` once per request. No retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{CompletionClient, CompletionError, CompletionRequest};

/// Public OpenAI API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: Url,
}

impl OpenAiClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn new(base_url: &str) -> Result<Self, CompletionError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, CompletionError> {
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'))
            .parse::<Url>()
            .map_err(|e| CompletionError::Transport(format!("Invalid base URL {base_url}: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<Option<String>, CompletionError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            let message = serde_json::from_str::<OpenAiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("OpenAI chat completion failed: {status} {body}"));
            return Err(CompletionError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let data: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        Ok(data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }
}
