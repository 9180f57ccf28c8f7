use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default Anthropic API endpoint
pub const ANTHROPIC_DEFAULT_URL: &str = "https://api.anthropic.com";

/// API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Errors raised by the language-model capability
///
/// None of these are recovered inside the pipeline; they abort the current
/// request and are reported by whoever drives the session.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("No API key configured")]
    MissingApiKey,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Model returned no text")]
    EmptyCompletion,
}

/// Opaque "given a prompt, return text" capability
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Single request/response round trip, no conversation state
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Anthropic Messages API client
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// Create a new client
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            model,
            temperature,
            max_tokens,
            client,
        })
    }

    /// Create a client from the `[llm]` config section
    pub fn from_settings(settings: &crate::config::LlmSettings) -> Result<Self, LlmError> {
        Self::new(
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
            settings.temperature,
            settings.max_tokens,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Sending {} byte prompt to {} ({})", prompt.len(), url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LlmError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }

        tracing::debug!("Received {} byte completion", text.len());

        Ok(text)
    }
}
