//! OpenAI-compatible chat-completions client.
//!
//! One request per call: failures are classified and returned, never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use super::provider::Provider;
use super::{ChatMessage, ChatOptions, ChatResponse, LlmClient, TokenUsage};

/// HTTP client for a provider's `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ChatCompletionsClient {
    /// Create a client for the provider's default endpoint.
    pub fn new(provider: Provider, api_key: String) -> Self {
        Self::with_base_url(provider.default_base_url(), api_key)
    }

    /// Create a client against a custom base URL (self-hosted gateways, tests).
    pub fn with_base_url(base_url: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a single request.
    async fn execute_request(&self, request: &ChatCompletionsRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network_error(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::from_status(status.as_u16(), error_message(&body)));
        }

        let parsed: ChatCompletionsResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::parse_error(format!(
                "Failed to parse response: {}, body: {}",
                e,
                &body[..floor_char_boundary(&body, 500)]
            ))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::empty_response("No choices in response".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            finish_reason: choice.finish_reason,
            usage: parsed
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
            model: parsed.model.or_else(|| Some(request.model.to_string())),
        })
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request = ChatCompletionsRequest {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        tracing::debug!("Sending chat completion: endpoint={} model={}", self.endpoint, model);

        let response = self.execute_request(&request).await;
        if let Err(ref e) = response {
            tracing::error!("Chat completion failed: {}", e);
        }
        response
    }
}

/// Pull a readable message out of an error body.
///
/// Providers wrap errors as `{"error": "..."}` or `{"error": {"message": "..."}}`;
/// anything else is passed through verbatim.
fn error_message(body: &str) -> String {
    let fallback = || {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "(empty body)".to_string()
        } else {
            trimmed.to_string()
        }
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };
    match value.get("error") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(fallback),
        None => fallback(),
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
}

/// Chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmErrorKind;

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are a mentor."),
            ChatMessage::user("Plan a todo app."),
        ]
    }

    #[test]
    fn test_endpoint_from_provider() {
        let client = ChatCompletionsClient::new(Provider::HuggingFace, "hf_test".to_string());
        assert_eq!(
            client.endpoint(),
            "https://router.huggingface.co/v1/chat/completions"
        );

        let client = ChatCompletionsClient::with_base_url("http://localhost:9000/v1/", "k".to_string());
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"error": "Unauthorized"}"#), "Unauthorized");
        assert_eq!(
            error_message(r#"{"error": {"message": "model not found", "code": 404}}"#),
            "model not found"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("  "), "(empty body)");
    }

    #[tokio::test]
    async fn test_chat_completion_success() {
        let mut server = mockito::Server::new_async().await;
        let base_url = format!("{}/v1", server.url());

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer hf_test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "meta-llama/Meta-Llama-3-8B-Instruct",
                "max_tokens": 2048
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "model": "meta-llama/Meta-Llama-3-8B-Instruct",
                    "choices": [{
                        "message": { "role": "assistant", "content": "### Step 1: Data" },
                        "finish_reason": "stop"
                    }],
                    "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ChatCompletionsClient::with_base_url(&base_url, "hf_test".to_string());
        let options = ChatOptions {
            max_tokens: Some(2048),
            ..ChatOptions::default()
        };
        let response = client
            .chat_completion("meta-llama/Meta-Llama-3-8B-Instruct", &messages(), &options)
            .await
            .unwrap();

        assert_eq!(response.content.as_deref(), Some("### Step 1: Data"));
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().total_tokens, 30);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_completion_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": "Invalid credentials in Authorization header"}"#)
            .create_async()
            .await;

        let client = ChatCompletionsClient::with_base_url(&server.url(), "bad".to_string());
        let err = client
            .chat_completion("m", &messages(), &ChatOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::Auth);
        assert_eq!(err.status_code, Some(401));
        assert_eq!(err.message, "Invalid credentials in Authorization header");
    }

    #[tokio::test]
    async fn test_chat_completion_rate_limited_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": "Rate limit exceeded"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ChatCompletionsClient::with_base_url(&server.url(), "k".to_string());
        let err = client
            .chat_completion("m", &messages(), &ChatOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::RateLimited);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_completion_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let client = ChatCompletionsClient::with_base_url(&server.url(), "k".to_string());
        let err = client
            .chat_completion("m", &messages(), &ChatOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::ParseError);
    }

    #[tokio::test]
    async fn test_chat_completion_no_choices() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = ChatCompletionsClient::with_base_url(&server.url(), "k".to_string());
        let err = client
            .chat_completion("m", &messages(), &ChatOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_chat_completion_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ChatCompletionsClient::with_base_url(
            &format!("http://127.0.0.1:{}", port),
            "k".to_string(),
        );
        let err = client
            .chat_completion("m", &messages(), &ChatOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, LlmErrorKind::NetworkError);
    }
}
