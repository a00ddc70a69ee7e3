//! Messages-API backend for the analysis provider
//!
//! Speaks the Anthropic-style Messages protocol: POST `/v1/messages` with
//! a model identifier, a max output size, and a single user message; the
//! response carries an ordered sequence of content blocks whose text
//! fragments are concatenated.
//!
//! # Configuration
//!
//! Environment variables:
//! - `KEEL_ANALYSIS_HOST`: provider base URL (required)
//! - `KEEL_ANALYSIS_MODEL`: model identifier (default: `claude-3-5-haiku-latest`)
//! - `KEEL_ANALYSIS_KEY`: API key header value (optional; some local
//!   servers require the header but ignore the value)

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const API_VERSION: &str = "2023-06-01";

/// Messages API request body.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// One message in the conversation. The analysis request is one-shot, so
/// there is only ever a single user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: text.into(),
        }
    }
}

/// Messages API response body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Content block in a response. The analysis provider only ever returns
/// text blocks; anything else fails the parse and degrades to the
/// fallback result upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Token usage information.
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl MessagesResponse {
    /// Concatenate the text fragments in order.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<_> = self
            .content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        }
    }
}

/// Backend speaking the Messages protocol over HTTP.
#[derive(Clone)]
pub struct MessagesBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl MessagesBackend {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create from `KEEL_ANALYSIS_*` environment variables. `None` when
    /// no host is configured.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("KEEL_ANALYSIS_HOST").ok()?;
        let model =
            std::env::var("KEEL_ANALYSIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let mut backend = Self::new(&base_url, &model);
        backend.api_key = std::env::var("KEEL_ANALYSIS_KEY").ok();
        Some(backend)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    /// Same host, different model.
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            api_key: self.api_key.clone(),
            max_tokens: self.max_tokens,
        }
    }

    /// One-shot completion: single user message, whole-response text.
    pub async fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(prompt)],
            system: system.map(String::from),
        };

        debug!(model = %self.model, host = %self.base_url, "Sending analysis request");

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.as_deref().unwrap_or("keel"))
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Analysis API error ({}): {}",
                status, body
            )));
        }

        let messages_response: MessagesResponse = response.json().await?;

        debug!(
            stop_reason = ?messages_response.stop_reason,
            output_tokens = messages_response.usage.as_ref().map(|u| u.output_tokens),
            "Received analysis response"
        );

        messages_response
            .text()
            .ok_or_else(|| Error::InvalidData("No text in analysis response".into()))
    }

    /// Verify the provider is reachable.
    pub async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("x-api-key", self.api_key.as_deref().unwrap_or("keel"))
            .header("anthropic-version", API_VERSION)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
