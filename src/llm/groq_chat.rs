//! Groq chat client over the OpenAI-compatible `/chat/completions` endpoint.
//!
//! Behaviour:
//! - One non-streaming `POST` per completion, two messages (system + user).
//! - Bearer authentication with the configured key.
//! - No retries: the first failure is returned as a [`ModelError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, ModelError, TextGenerator};
use crate::config::LlmConfig;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Async chat-completions client bound to a single model.
pub struct GroqChat {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GroqChat {
    /// Build a client from provider settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GroqChat {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::from_status(status.as_u16(), &text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ModelError::from_transport(e, self.timeout))?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::MalformedResponse("no choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| ModelError::MalformedResponse("choice has no content".to_string()))?;

        debug!(chars = content.chars().count(), "chat completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = LlmConfig::new("key").with_base_url("http://localhost:9000/v1/");
        let client = GroqChat::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(client.model_id(), crate::config::DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "qwen/qwen3-32b",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be a guide",
                },
                ChatMessage {
                    role: "user",
                    content: "plan Paris",
                },
            ],
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen/qwen3-32b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "plan Paris");
    }

    #[test]
    fn test_response_without_choices_decodes_empty() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
