//! Client for OpenAI-compatible `chat/completions` endpoints (OpenAI, Groq).

use async_trait::async_trait;
use clausewise_core::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::{BackendError, CompletionBackend, CompletionRequest};

/// HTTP chat-completions client.
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatClient {
    /// Create a client for the given API base URL and model.
    ///
    /// `base_url` should be like `https://api.groq.com/openai/v1`; a trailing
    /// slash is dropped.
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.base_url.clone(), config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);

        info!(
            url = %url,
            model = %self.model,
            chars = request.user_prompt.len(),
            "requesting completion"
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_body(request))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let reply: ChatResponse = serde_json::from_slice(&bytes)?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(BackendError::EmptyReply)?;
        debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use clausewise_core::Provider;
    use serde_json::{Value, json};

    fn request(json_mode: bool) -> CompletionRequest {
        CompletionRequest {
            system_prompt: "system".into(),
            user_prompt: "user".into(),
            max_tokens: 3000,
            temperature: 0.2,
            json_mode,
        }
    }

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ChatClient::new("https://api.groq.com/openai/v1/".into(), "m".into());
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn from_config_uses_provider_defaults() {
        let config = AnalyzerConfig::for_provider(Provider::Groq, None);
        let client = ChatClient::from_config(&config);
        assert_eq!(client.model(), "mixtral-8x7b-32768");
        assert_eq!(client.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn body_includes_both_messages() {
        let client = ChatClient::new("http://localhost".into(), "gpt-4o-mini".into());
        let req = request(false);
        let body = serde_json::to_value(client.build_body(&req)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user");
        assert_eq!(body["max_tokens"], 3000);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn json_mode_sets_response_format() {
        let client = ChatClient::new("http://localhost".into(), "gpt-4o-mini".into());
        let req = request(true);
        let body = serde_json::to_value(client.build_body(&req)).unwrap();
        assert_eq!(body["response_format"], json!({ "type": "json_object" }));
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, axum::Json(body): axum::Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer gsk_test");
                assert_eq!(body["model"], "mixtral-8x7b-32768");
                axum::Json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": "{\"score\":85}" } }]
                }))
            }),
        );
        let base_url = serve(app).await;
        let client = ChatClient::new(base_url, "mixtral-8x7b-32768".into());

        let content = client.complete("gsk_test", &request(false)).await.unwrap();
        assert_eq!(content, "{\"score\":85}");
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base_url = serve(app).await;
        let client = ChatClient::new(base_url, "gpt-4o-mini".into());

        let err = client.complete("bad", &request(true)).await.unwrap_err();
        match err {
            BackendError::Server { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { axum::Json(json!({ "choices": [] })) }),
        );
        let base_url = serve(app).await;
        let client = ChatClient::new(base_url, "gpt-4o-mini".into());

        let err = client.complete("key", &request(false)).await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyReply));
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        // Bind then drop a listener to get a local port nothing is serving.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ChatClient::new(format!("http://{addr}/v1"), "m".into());
        let err = client.complete("key", &request(false)).await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}
