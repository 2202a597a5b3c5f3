//! Terminal chat loop.
//!
//! Each input line is typed into the session key by key. A line ending in `\`
//! continues the draft on the next line; any other line commits it.

use std::io::Write;

use canto_core::persona;
use canto_core::session::{ChatSession, KeyOutcome, KeyPress, RelayTransport};
use canto_core::view::{ChatView, ScrollTracker};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::Result;

const QUIT: &str = "/quit";

/// Draws only the turns that were not printed yet.
struct Renderer<W> {
    out: W,
    printed: usize,
    scroll: ScrollTracker,
}

impl<W: Write> Renderer<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            printed: 0,
            scroll: ScrollTracker::default(),
        }
    }

    fn draw(&mut self, view: &ChatView) -> Result<()> {
        if !self.scroll.should_scroll(view) {
            return Ok(());
        }
        for turn in view.turns.iter().skip(self.printed) {
            let who = if turn.is_user { "you" } else { "coach" };
            writeln!(self.out, "{who}> {}", turn.content)?;
        }
        self.printed = view.turns.len();
        if view.pending {
            writeln!(self.out, "… {}", persona::PENDING_LABEL)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Runs the conversation until `/quit` or end of input.
pub async fn run<T, R, W>(session: &ChatSession<T>, input: R, out: W) -> Result<()>
where
    T: RelayTransport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut renderer = Renderer::new(out);
    writeln!(renderer.out, "{}", persona::TITLE)?;
    writeln!(renderer.out, "{}", persona::INPUT_HINT)?;
    renderer.draw(&ChatView::from_session(session))?;
    renderer.prompt()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == QUIT {
            break;
        }

        let (text, continues) = match line.strip_suffix('\\') {
            Some(head) => (head, true),
            None => (line.as_str(), false),
        };
        for c in text.chars() {
            session.on_key(KeyPress::Char(c));
        }

        if session.on_key(KeyPress::Enter { shift: continues }) == KeyOutcome::Send {
            log::debug!("sending draft");
            let (_, drawn) = tokio::join!(session.send(), async {
                // The user turn and the pending label show while the reply is in flight.
                tokio::task::yield_now().await;
                if session.is_awaiting() {
                    renderer.draw(&ChatView::from_session(session))
                } else {
                    Ok(())
                }
            });
            drawn?;
            renderer.draw(&ChatView::from_session(session))?;
        }
        renderer.prompt()?;
    }

    writeln!(renderer.out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use canto_core::payload::{ChatRequest, ChatResponse};
    use canto_core::session::TransportError;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        drafts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RelayTransport for RecordingTransport {
        async fn send(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, TransportError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            self.drafts.lock().unwrap().push(last.clone());
            Ok(ChatResponse::reply(format!("echo {last}")))
        }
    }

    /// Yields a few times before answering, like a relay on the network.
    struct SlowTransport;

    #[async_trait]
    impl RelayTransport for SlowTransport {
        async fn send(&self, _request: &ChatRequest) -> std::result::Result<ChatResponse, TransportError> {
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            Ok(ChatResponse::reply("ok"))
        }
    }

    async fn run_with(input: &str) -> (String, Vec<String>) {
        let session = ChatSession::new(RecordingTransport::default());
        let mut out = Vec::new();
        run(&session, input.as_bytes(), &mut out).await.unwrap();
        let drafts = session.transport().drafts.lock().unwrap().clone();
        (String::from_utf8(out).unwrap(), drafts)
    }

    #[tokio::test]
    async fn prints_greeting_and_replies() {
        let (out, drafts) = run_with("hola\n").await;
        assert!(out.contains(&format!("coach> {}", persona::GREETING)));
        assert!(out.contains("you> hola"));
        assert!(out.contains("coach> echo hola"));
        assert_eq!(drafts, ["hola"]);
    }

    #[tokio::test]
    async fn backslash_continues_draft() {
        let (_, drafts) = run_with("first line\\\nsecond line\n").await;
        assert_eq!(drafts, ["first line\nsecond line"]);
    }

    #[tokio::test]
    async fn blank_lines_send_nothing() {
        let (out, drafts) = run_with("\n   \n").await;
        assert!(drafts.is_empty());
        assert!(!out.contains("you>"));
    }

    #[tokio::test]
    async fn pending_label_printed_while_awaiting_reply() {
        let session = ChatSession::new(SlowTransport);
        let mut out = Vec::new();
        run(&session, "hola\n".as_bytes(), &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        let user_at = out.find("you> hola").expect("user turn printed");
        let pending_at = out
            .find(&format!("… {}", persona::PENDING_LABEL))
            .expect("pending label printed");
        let reply_at = out.find("coach> ok").expect("reply printed");
        assert!(user_at < pending_at && pending_at < reply_at);
        assert_eq!(out.matches("you> hola").count(), 1);
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let (_, drafts) = run_with("/quit\nhola\n").await;
        assert!(drafts.is_empty());
    }
}
