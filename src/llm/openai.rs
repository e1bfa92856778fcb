//! OpenAI-compatible chat completions client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionError};
use crate::config::LlmConfig;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for any service speaking the OpenAI chat completions API.
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Create a client from the `llm` section of the settings.
    pub fn new(config: &LlmConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Pull the human-readable message out of an error body, if it has the usual shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn status_error(status: StatusCode, body: &str) -> CompletionError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens: self.max_tokens,
        };

        let started = Instant::now();
        let mut builder = self.client.post(self.api_url()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }
        let response = builder.send().await?;

        let status = response.status();
        tracing::debug!(
            model = %self.model,
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "completion response"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            CompletionError::InvalidResponse("response contained no choices".to_string())
        })?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!(model = %self.model, "completion stopped at the token limit");
        }

        choice.message.content.ok_or_else(|| {
            CompletionError::InvalidResponse("first choice has no message content".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, http};
    use serde_json::{Value, json};

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/")
    }

    fn client_for(base_url: String) -> OpenAiClient {
        OpenAiClient::new(&LlmConfig {
            api_key: Some("sk-test".to_string()),
            base_url,
            timeout_secs: 5,
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = client_for("https://example.com/v1/".to_string());
        assert_eq!(client.api_url(), "https://example.com/v1/chat/completions");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#),
            "Invalid API key"
        );
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[tokio::test]
    async fn test_complete_sends_both_prompts() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let echo = json!({
                    "auth": headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default(),
                    "model": body["model"],
                    "system": body["messages"][0],
                    "user": body["messages"][1],
                    "temperature": body["temperature"],
                    "has_max_tokens": body.get("max_tokens").is_some(),
                });
                Json(json!({
                    "choices": [{
                        "message": { "role": "assistant", "content": echo.to_string() },
                        "finish_reason": "stop"
                    }]
                }))
            }),
        );
        let client = client_for(spawn_server(app).await);

        let text = client
            .complete("You are a writer.", "Write a headline.", 0.3)
            .await
            .unwrap();
        let echo: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(echo["auth"], "Bearer sk-test");
        assert_eq!(echo["model"], "gpt-4o-mini");
        assert_eq!(echo["system"], json!({ "role": "system", "content": "You are a writer." }));
        assert_eq!(echo["user"], json!({ "role": "user", "content": "Write a headline." }));
        assert_eq!(echo["temperature"], json!(0.3));
        assert_eq!(echo["has_max_tokens"], false);
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    http::StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": { "message": "Rate limit reached" } })),
                )
            }),
        );
        let client = client_for(spawn_server(app).await);

        let err = client.complete("s", "u", 0.7).await.unwrap_err();

        assert!(matches!(err, CompletionError::RateLimited(ref m) if m == "Rate limit reached"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_reported() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (http::StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let client = client_for(spawn_server(app).await);

        let err = client.complete("s", "u", 0.7).await.unwrap_err();

        assert!(matches!(
            err,
            CompletionError::Unauthorized { status: 401, ref message } if message == "bad key"
        ));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn_server(app).await);

        let err = client.complete("s", "u", 0.7).await.unwrap_err();

        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(format!("http://{addr}/v1"));

        let err = client.complete("s", "u", 0.7).await.unwrap_err();

        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
