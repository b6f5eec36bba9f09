//! Ollama request/response types.

use serde::{Deserialize, Serialize};

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

/// Sampling options sent under `options`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    /// Maximum tokens to generate
    pub num_predict: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: prompttune_core::settings::DEFAULT_TEMPERATURE,
            top_p: 0.8,
            num_predict: 250,
        }
    }
}

/// Body of `POST /api/chat`. Always non-streaming.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    pub content: Option<String>,
}

/// One entry of `GET /api/tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// Reachability of an Ollama server and the models it serves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionStatus {
    pub endpoint: String,
    pub models: Vec<ModelTag>,
}

impl ConnectionStatus {
    /// Substring match, so `llama2` finds `llama2:latest`.
    pub fn has_model(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.name.contains(name))
    }
}
