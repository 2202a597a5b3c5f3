//! Rendering model for the chat transcript.
//!
//! Renderers (HTML page, terminal) consume a [`ChatView`] instead of the
//! session directly so presentation rules live in one place.

use serde::Serialize;

use crate::message::{Role, Transcript};
use crate::session::{ChatSession, RelayTransport};

/// Horizontal placement of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    End,
}

/// One rendered turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnView {
    pub role: Role,
    pub content: String,
    pub align: Align,
    pub is_user: bool,
}

/// Everything a renderer needs to draw the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    /// Turns top-to-bottom in insertion order. System turns are not shown.
    pub turns: Vec<TurnView>,
    /// Show the "assistant is thinking" indicator.
    pub pending: bool,
    /// Changes whenever the transcript or `pending` changes. Renderers scroll
    /// to the latest entry when it differs from the last key they drew.
    pub scroll_key: u64,
}

impl ChatView {
    pub fn new(transcript: &Transcript, pending: bool, scroll_key: u64) -> Self {
        let turns = transcript
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| {
                let is_user = m.role == Role::User;
                TurnView {
                    role: m.role,
                    content: m.content.clone(),
                    align: if is_user { Align::End } else { Align::Start },
                    is_user,
                }
            })
            .collect();
        Self {
            turns,
            pending,
            scroll_key,
        }
    }

    pub fn from_session<T: RelayTransport>(session: &ChatSession<T>) -> Self {
        Self::new(
            &session.transcript(),
            session.is_awaiting(),
            session.revision(),
        )
    }

    pub fn latest(&self) -> Option<&TurnView> {
        self.turns.last()
    }
}

/// Tracks the last drawn scroll key and reports when to scroll.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last: Option<u64>,
}

impl ScrollTracker {
    /// Returns `true` when `view` differs from the previously drawn one.
    pub fn should_scroll(&mut self, view: &ChatView) -> bool {
        let changed = self.last != Some(view.scroll_key);
        self.last = Some(view.scroll_key);
        changed
    }
}
