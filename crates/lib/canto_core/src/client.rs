//! HTTP transport from a chat UI to the relay endpoint.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::payload::{ChatRequest, ChatResponse};
use crate::session::{RelayTransport, TransportError};

/// Path of the relay route.
pub const CHAT_PATH: &str = "/api/chat";

/// Posts chat requests to a running relay server.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    endpoint: Url,
}

impl HttpRelay {
    /// Creates a transport for the relay served at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = format!("{}{CHAT_PATH}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| TransportError::Network(format!("Invalid relay URL {base_url}: {e}")))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(status = %resp.status(), "relay responded");

        // Error statuses still carry a JSON body (`{error}`), decode it either way.
        resp.json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::message::{Message, Transcript};

    #[test]
    fn endpoint_is_api_chat() {
        let relay = HttpRelay::new("http://127.0.0.1:3100").unwrap();
        assert_eq!(relay.endpoint().as_str(), "http://127.0.0.1:3100/api/chat");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let relay = HttpRelay::new("http://relay.local/canto/").unwrap();
        assert_eq!(relay.endpoint().as_str(), "http://relay.local/canto/api/chat");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpRelay::new("not a url").is_err());
    }

    #[tokio::test]
    async fn posts_request_and_decodes_reply() {
        let server = MockServer::start().await;
        let transcript = Transcript::from(vec![Message::user("hola")]);
        let request = ChatRequest::from_transcript(Some("coach"), &transcript);

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "systemPrompt": "coach",
                "messages": [{"role": "user", "content": "hola"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi"})))
            .expect(1)
            .mount(&server)
            .await;

        let relay = HttpRelay::new(&server.uri()).unwrap();
        let resp = relay.send(&request).await.unwrap();
        assert_eq!(resp.reply.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn error_status_body_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Missing OPENAI_API_KEY"})),
            )
            .mount(&server)
            .await;

        let relay = HttpRelay::new(&server.uri()).unwrap();
        let resp = relay.send(&ChatRequest::default()).await.unwrap();
        assert!(resp.reply.is_none());
        assert_eq!(resp.error.as_deref(), Some("Missing OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let relay = HttpRelay::new(&server.uri()).unwrap();
        let err = relay.send(&ChatRequest::default()).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let relay = HttpRelay::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = relay.send(&ChatRequest::default()).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
