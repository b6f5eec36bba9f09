//! LLM client: trait + Ollama implementation (self-hosted).

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::error::{LlmError, Result};
use crate::types::{ChatRequest, ChatResponse, ModelTag, TagsResponse};

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one chat request to `endpoint` and return the reply's text content.
    async fn chat(&self, endpoint: &str, request: &ChatRequest) -> Result<String>;

    /// Models installed on the server at `endpoint`.
    async fn list_models(&self, endpoint: &str) -> Result<Vec<ModelTag>>;
}

/// Ollama HTTP client. The endpoint is per call so settings can change between requests.
pub struct OllamaClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OllamaClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Reads `PROMPTTUNE_TIMEOUT_SECS`, falling back to the default.
    pub fn from_env() -> Self {
        let mut client = Self::new();
        if let Ok(secs) = std::env::var("PROMPTTUNE_TIMEOUT_SECS") {
            if let Ok(val) = secs.parse::<u64>() {
                client.timeout_secs = val;
            }
        }
        client
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let duration = Duration::from_secs(self.timeout_secs);
        let res = timeout(duration, request.send())
            .await
            .map_err(|_| LlmError::Timeout(self.timeout_secs))??;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn chat(&self, endpoint: &str, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/api/chat", endpoint.trim_end_matches('/'));
        tracing::debug!(url = %url, model = %request.model, "sending chat request");

        let text = self.send(self.client.post(&url).json(request)).await?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| LlmError::MalformedResponse("missing message.content".to_string()))
    }

    async fn list_models(&self, endpoint: &str) -> Result<Vec<ModelTag>> {
        let url = format!("{}/api/tags", endpoint.trim_end_matches('/'));
        let text = self.send(self.client.get(&url)).await?;
        let parsed: TagsResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        Ok(parsed.models)
    }
}
