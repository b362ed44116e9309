//! Chat-completion transport for the insight generator

use crate::config::{ApiKey, GeneratorConfig};
use crate::error::InsightError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// External text generator: one prompt in, one text blob out
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, InsightError>;
}

/// Any message mentioning "json" asks the service for a JSON reply
pub fn wants_json(messages: &[ChatMessage]) -> bool {
    messages
        .iter()
        .any(|m| m.content.to_lowercase().contains("json"))
}

/// OpenAI-compatible `/chat/completions` client
pub struct ChatCompletionClient {
    http: reqwest::Client,
    api_key: ApiKey,
    endpoint: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(config: &GeneratorConfig, api_key: ApiKey) -> Result<Self, InsightError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InsightError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn request_body(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature.clamp(0.0, 1.0),
            "max_tokens": max_tokens,
        });
        if wants_json(messages) {
            body["response_format"] = serde_json::json!({"type": "json_object"});
        }
        body
    }
}

#[async_trait]
impl TextCompletion for ChatCompletionClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, InsightError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&self.request_body(messages, temperature, max_tokens))
            .send()
            .await
            .map_err(|e| InsightError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(InsightError::MissingCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| InsightError::InvalidReply(e.to_string()))?;
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim();

        if text.is_empty() {
            return Err(InsightError::EmptyReply);
        }
        Ok(text.to_string())
    }
}
