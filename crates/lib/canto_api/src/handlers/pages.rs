//! Browser pages: landing page and the chat widget.
//!
//! The chat page carries the transcript in a hidden form field, so the server
//! keeps nothing between requests.

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use canto_core::message::Transcript;
use canto_core::persona;
use canto_core::session::ChatSession;
use canto_core::view::ChatView;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::services::relay::LocalRelay;

const INDEX_TEMPLATE: &str = "index.html";
const CHAT_TEMPLATE: &str = "chat.html";

/// Compiles the embedded page templates.
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (INDEX_TEMPLATE, include_str!("../../templates/index.html")),
        (CHAT_TEMPLATE, include_str!("../../templates/chat.html")),
    ])?;
    Ok(tera)
}

/// Fields posted by the chat form.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    /// JSON-encoded transcript rendered into the previous page.
    pub transcript: String,
    #[serde(default)]
    pub draft: String,
}

/// `GET /` — landing page linking to the chat.
pub async fn index_handler(State(state): State<AppState>) -> AppResult<Html<String>> {
    let mut ctx = Context::new();
    ctx.insert("title", persona::TITLE);
    ctx.insert("chat_url", routes::CHATBOT);
    Ok(Html(state.templates.render(INDEX_TEMPLATE, &ctx)?))
}

/// `GET /chatbot` — fresh conversation with the greeting.
pub async fn chat_page_handler(State(state): State<AppState>) -> AppResult<Html<String>> {
    let transcript = Transcript::seeded();
    render_chat(&state.templates, &ChatView::new(&transcript, false, 0), &transcript)
}

/// `POST /chatbot` — send the draft and render the updated conversation.
pub async fn chat_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> AppResult<Html<String>> {
    let transcript: Transcript = serde_json::from_str(&form.transcript)
        .map_err(|e| AppError::BadRequest(format!("Invalid transcript: {e}")))?;

    let session = ChatSession::with_transcript(LocalRelay::new(state.clone()), transcript);
    session.submit(form.draft).await;

    render_chat(
        &state.templates,
        &ChatView::from_session(&session),
        &session.transcript(),
    )
}

fn render_chat(tera: &Tera, view: &ChatView, transcript: &Transcript) -> AppResult<Html<String>> {
    let transcript_json =
        serde_json::to_string(transcript).map_err(|e| AppError::Render(e.to_string()))?;

    let mut ctx = Context::new();
    ctx.insert("title", persona::TITLE);
    ctx.insert("placeholder", persona::PLACEHOLDER);
    ctx.insert("hint", persona::INPUT_HINT);
    ctx.insert("pending_label", persona::PENDING_LABEL);
    ctx.insert("action", routes::CHATBOT);
    ctx.insert("view", view);
    ctx.insert("transcript_json", &transcript_json);
    Ok(Html(tera.render(CHAT_TEMPLATE, &ctx)?))
}

#[cfg(test)]
mod tests {
    use canto_core::message::Message;

    use super::*;

    #[test]
    fn templates_compile() {
        let tera = templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(names.contains(&INDEX_TEMPLATE));
        assert!(names.contains(&CHAT_TEMPLATE));
    }

    #[test]
    fn chat_page_escapes_content() {
        let tera = templates().unwrap();
        let transcript = Transcript::from(vec![Message::user("<script>alert(1)</script>")]);
        let Html(page) = render_chat(&tera, &ChatView::new(&transcript, false, 0), &transcript)
            .unwrap();
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn pending_indicator_hidden_until_awaiting() {
        let tera = templates().unwrap();
        let transcript = Transcript::seeded();
        let Html(idle) =
            render_chat(&tera, &ChatView::new(&transcript, false, 0), &transcript).unwrap();
        let Html(busy) =
            render_chat(&tera, &ChatView::new(&transcript, true, 1), &transcript).unwrap();
        assert!(idle.contains(persona::PENDING_LABEL));
        assert!(idle.contains(r#"id="pending" hidden"#));
        assert!(!busy.contains(r#"id="pending" hidden"#));
        assert!(busy.contains("disabled>Send"));
    }

    #[test]
    fn chat_form_guards_double_submit() {
        let tera = templates().unwrap();
        let transcript = Transcript::seeded();
        let Html(page) =
            render_chat(&tera, &ChatView::new(&transcript, false, 0), &transcript).unwrap();
        assert!(page.contains(r#"<textarea id="draft" name="draft""#));
        assert!(page.contains(r#"addEventListener("submit""#));
        assert!(page.contains("if (awaiting ||"));
        assert!(page.contains("button.disabled = true;"));
        assert!(page.contains("pending.hidden = false;"));
        assert!(page.contains("!event.shiftKey"));
    }
}
