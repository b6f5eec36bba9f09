//! LLM error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] prompttune_core::CoreError),

    #[error("Ollama API error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
