//! Chat session controller: the state machine behind the chat UI.
//!
//! A [`ChatSession`] owns the transcript, the draft input and the "awaiting
//! reply" flag. Renderers read snapshots and forward user input; the session
//! talks to the relay through a [`RelayTransport`].
//!
//! Only one request is ever in flight per session. A send attempted while a
//! reply is pending is dropped, not queued.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::message::{Message, Transcript};
use crate::payload::{ChatRequest, ChatResponse};
use crate::persona;

/// Errors raised while talking to the relay endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Relay request failed: {0}")]
    Network(String),

    #[error("Relay response parse error: {0}")]
    Decode(String),
}

/// Delivers a [`ChatRequest`] to the relay and returns its decoded body.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// Key events the input box forwards to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Enter, with or without Shift held.
    Enter { shift: bool },
    Char(char),
    Backspace,
}

/// What the caller should do after [`ChatSession::on_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The commit key was pressed; call [`ChatSession::send`].
    Send,
    /// The draft changed.
    Edited,
    Ignored,
}

#[derive(Debug)]
struct SessionState {
    transcript: Transcript,
    draft: String,
    awaiting: bool,
    revision: u64,
}

/// Clears the awaiting flag when the request lifecycle ends, however it ends.
struct AwaitingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.awaiting = false;
        state.revision += 1;
    }
}

/// Controller for a single conversation.
pub struct ChatSession<T> {
    transport: T,
    state: Mutex<SessionState>,
}

impl<T: RelayTransport> ChatSession<T> {
    /// New session seeded with the assistant greeting.
    pub fn new(transport: T) -> Self {
        Self::with_transcript(transport, Transcript::seeded())
    }

    /// Resumes a conversation from an existing transcript.
    pub fn with_transcript(transport: T, transcript: Transcript) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState {
                transcript,
                draft: String::new(),
                awaiting: false,
                revision: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock().transcript.clone()
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.lock().draft = draft.into();
    }

    pub fn is_awaiting(&self) -> bool {
        self.lock().awaiting
    }

    /// Counter bumped whenever the transcript or the awaiting flag changes.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Applies a key press to the draft.
    ///
    /// Plain Enter is the commit key and is not inserted; Shift+Enter inserts
    /// a line break.
    pub fn on_key(&self, key: KeyPress) -> KeyOutcome {
        let mut state = self.lock();
        match key {
            KeyPress::Enter { shift: false } => KeyOutcome::Send,
            KeyPress::Enter { shift: true } => {
                state.draft.push('\n');
                KeyOutcome::Edited
            }
            KeyPress::Char(c) => {
                state.draft.push(c);
                KeyOutcome::Edited
            }
            KeyPress::Backspace => match state.draft.pop() {
                Some(_) => KeyOutcome::Edited,
                None => KeyOutcome::Ignored,
            },
        }
    }

    /// Replaces the draft with `draft` and sends it.
    pub async fn submit(&self, draft: impl Into<String>) -> Transcript {
        self.set_draft(draft);
        self.send().await
    }

    /// Sends the current draft and appends the assistant reply.
    ///
    /// Does nothing when the trimmed draft is empty or a reply is pending.
    /// Transport failures become an assistant error message. Returns the
    /// transcript as it stands afterwards.
    pub async fn send(&self) -> Transcript {
        let request = {
            let mut state = self.lock();
            let text = state.draft.trim().to_string();
            if text.is_empty() || state.awaiting {
                debug!(awaiting = state.awaiting, "send ignored");
                return state.transcript.clone();
            }
            state.transcript.push(Message::user(text));
            state.draft.clear();
            state.awaiting = true;
            state.revision += 1;
            ChatRequest::from_transcript(Some(persona::COACH_SYSTEM_PROMPT), &state.transcript)
        };
        let guard = AwaitingGuard { state: &self.state };

        debug!(messages = request.messages.len(), "sending transcript to relay");
        let reply = match self.transport.send(&request).await {
            Ok(resp) => resp
                .reply
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| persona::FALLBACK_REPLY.to_string()),
            Err(e) => {
                warn!(error = %e, "relay request failed");
                persona::CONNECTION_ERROR_REPLY.to_string()
            }
        };

        {
            let mut state = self.lock();
            state.transcript.push(Message::assistant(reply));
            state.revision += 1;
        }
        drop(guard);

        self.transcript()
    }
}
