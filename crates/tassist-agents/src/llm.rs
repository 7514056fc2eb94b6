use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tassist_models::config::LlmConfig;
use tracing::{debug, warn};

use crate::error::ToolError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One complete prompt: system instructions plus the conversation so far,
/// ending with the current user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

/// The single external collaborator: a synchronous request/response call to
/// a language model. Mockable for testing.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ToolError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(api_key: String, config: LlmConfig) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ToolError::ExternalService(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    fn request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let mut messages = vec![json!({"role": "system", "content": request.system})];
        for message in &request.messages {
            let role = match message.role {
                ChatRole::System => "system",
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            messages.push(json!({"role": role, "content": message.content}));
        }

        json!({
            "model": self.config.model,
            "messages": messages,
            "max_completion_tokens": self.config.max_completion_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ToolError> {
        let url = format!("{}/chat/completions", self.config.api_base);
        debug!(model = %self.config.model, messages = request.messages.len(), "Sending chat request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| ToolError::ExternalService(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Chat request rejected");
            return Err(ToolError::ExternalService(format!(
                "HTTP {status}: {body}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolError::ExternalService(format!("malformed response body: {e}")))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ToolError::ExternalService("response missing choices[0].message.content".to_string())
            })
    }
}
