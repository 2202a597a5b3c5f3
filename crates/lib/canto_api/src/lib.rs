//! # canto_api
//!
//! HTTP API library for Canto: the chat relay endpoint and the browser pages.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use canto_core::completion::CompletionClient;
use canto_core::completion::openai::OpenAiClient;
use tera::Tera;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::handlers::{chat, pages};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Completion provider the relay calls.
    pub completion: Arc<dyn CompletionClient>,
    /// Compiled page templates.
    pub templates: Arc<Tera>,
}

impl AppState {
    /// State backed by the given completion provider.
    pub fn new(config: ApiConfig, completion: Arc<dyn CompletionClient>) -> AppResult<Self> {
        Ok(Self {
            config,
            completion,
            templates: Arc::new(pages::templates()?),
        })
    }

    /// State backed by the OpenAI client at `config.openai_base_url`.
    pub fn openai(config: ApiConfig) -> AppResult<Self> {
        let client = OpenAiClient::new(&config.openai_base_url)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Self::new(config, Arc::new(client))
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new().route(
        routes::API_CHAT,
        post(chat::chat_handler).fallback(chat::method_not_allowed),
    );

    let pages = Router::new()
        .route(routes::HOME, get(pages::index_handler))
        .route(
            routes::CHATBOT,
            get(pages::chat_page_handler).post(pages::chat_submit_handler),
        );

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(cors)
        .with_state(state)
}
