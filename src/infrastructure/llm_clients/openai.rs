use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
/// (OpenAI, OpenRouter, local servers)
pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn api_key(config: &LLMConfig) -> Result<Option<String>> {
        match &config.api_key {
            Some(key) if !key.trim().is_empty() => Ok(Some(key.clone())),
            _ if config.requires_api_key() => Err(AppError::LLMError(format!(
                "Missing API key for {:?}",
                config.provider
            ))),
            _ => Ok(None),
        }
    }

    fn describe_status(status: StatusCode, body: &str) -> String {
        match status {
            StatusCode::TOO_MANY_REQUESTS => format!("Rate limited ({}): {}", status, body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                format!("Authentication failed ({}): {}", status, body)
            }
            _ => format!("API error ({}): {}", status, body),
        }
    }

    fn extract_content(body: &str) -> Result<String> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = config.endpoint("chat/completions");

        let body = ChatRequest {
            model: &config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        debug!(url = %url, model = %config.model, "Sending chat completion request");

        let mut request = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(config.timeout_secs))
            .json(&body);
        if let Some(key) = api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::LLMError(Self::describe_status(status, &text)));
        }

        Self::extract_content(&text)
    }
}
