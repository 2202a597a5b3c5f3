//! Route paths.

/// JSON relay endpoint.
pub const API_CHAT: &str = canto_core::client::CHAT_PATH;

/// Landing page.
pub const HOME: &str = "/";

/// Chat page.
pub const CHATBOT: &str = "/chatbot";
