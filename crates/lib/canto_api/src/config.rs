//! API server configuration.

use std::fmt;

use canto_core::completion::DEFAULT_MODEL;
use canto_core::completion::openai::OPENAI_BASE_URL;

/// Environment variable holding the completion API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Where the completion API credential comes from.
///
/// The key is looked up on every request, so it never needs to be present at
/// startup.
#[derive(Clone)]
pub enum ApiKeySource {
    /// Read [`API_KEY_VAR`] from the process environment.
    Env,
    /// Fixed value, used by tests and embedders.
    Fixed(Option<String>),
}

impl ApiKeySource {
    /// Current credential, if any. Empty values count as missing.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env => std::env::var(API_KEY_VAR).ok(),
            ApiKeySource::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeySource::Env => write!(f, "Env({API_KEY_VAR})"),
            ApiKeySource::Fixed(Some(_)) => write!(f, "Fixed(<redacted>)"),
            ApiKeySource::Fixed(None) => write!(f, "Fixed(None)"),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// Completion API credential source.
    pub api_key: ApiKeySource,
    /// Root of the OpenAI-compatible API.
    pub openai_base_url: String,
    /// Model sent with every completion.
    pub model: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable          | Default                       |
    /// |-------------------|-------------------------------|
    /// | `BIND_ADDR`       | `127.0.0.1:3100`              |
    /// | `OPENAI_API_KEY`  | read per request              |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1`   |
    /// | `OPENAI_MODEL`    | `gpt-4o-mini`                 |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            api_key: ApiKeySource::Env,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OPENAI_BASE_URL.into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}
