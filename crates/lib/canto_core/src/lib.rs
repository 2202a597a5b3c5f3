//! # canto_core
//!
//! Core domain logic for Canto: chat turns, wire payloads, the completion
//! client, and the chat session controller that drives the UI.

pub mod client;
pub mod completion;
pub mod message;
pub mod payload;
pub mod persona;
pub mod session;
pub mod view;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
