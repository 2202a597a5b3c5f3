//! Wire payloads exchanged between the chat UI and the relay endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::message::{Message, Transcript};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<Message>,
}

/// `"messages": null` reads the same as a missing field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    /// Builds a request replaying `transcript` verbatim.
    pub fn from_transcript(system_prompt: Option<&str>, transcript: &Transcript) -> Self {
        Self {
            system_prompt: system_prompt.map(str::to_string),
            messages: transcript.as_slice().to_vec(),
        }
    }
}

/// Body returned by the relay: `{reply}` on success, `{error}` on failure.
///
/// Both fields are optional so callers can tell a missing reply apart from an
/// empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            reply: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn request_uses_camel_case_system_prompt() {
        let transcript = Transcript::from(vec![Message::user("hola")]);
        let req = ChatRequest::from_transcript(Some("be nice"), &transcript);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["systemPrompt"], "be nice");
        assert_eq!(json["messages"][0]["content"], "hola");
    }

    #[test]
    fn request_without_prompt_omits_field() {
        let req = ChatRequest::from_transcript(None, &Transcript::new());
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"messages":[]}"#);
    }

    #[test]
    fn request_missing_messages_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.messages.is_empty());
        assert!(req.system_prompt.is_none());
    }

    #[test]
    fn request_null_messages_is_empty() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"systemPrompt":"coach","messages":null}"#).unwrap();
        assert!(req.messages.is_empty());
        assert_eq!(req.system_prompt.as_deref(), Some("coach"));
    }

    #[test]
    fn request_decodes_roles() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"a"},{"role":"assistant","content":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.messages[1].role, Role::Assistant);
    }

    #[test]
    fn response_shapes() {
        assert_eq!(
            serde_json::to_string(&ChatResponse::reply("ok")).unwrap(),
            r#"{"reply":"ok"}"#
        );
        assert_eq!(
            serde_json::to_string(&ChatResponse::error("bad")).unwrap(),
            r#"{"error":"bad"}"#
        );
        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.reply.is_none());
    }
}
