//! Inference settings shared by every caller.
//!
//! Passed explicitly into handlers; nothing here is cached globally.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Settings as the extension stores and sends them (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the Ollama server, without trailing slash
    #[serde(default = "default_endpoint")]
    pub ollama_endpoint: String,
    /// Model tag passed to `/api/chat`
    #[serde(default = "default_model")]
    pub model_name: String,
    /// Sampling temperature, 0.0..=2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_endpoint() -> String {
    DEFAULT_OLLAMA_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ollama_endpoint: default_endpoint(),
            model_name: default_model(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Settings {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.ollama_endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_name = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Endpoint with any trailing slash removed, for URL joining.
    pub fn endpoint(&self) -> &str {
        self.ollama_endpoint.trim_end_matches('/')
    }

    /// Reject values Ollama would refuse or silently misread.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint().is_empty() {
            return Err(CoreError::Config("ollama endpoint is empty".into()));
        }
        if !self.endpoint().starts_with("http://") && !self.endpoint().starts_with("https://") {
            return Err(CoreError::Config(format!(
                "ollama endpoint must be an http(s) URL, got '{}'",
                self.ollama_endpoint
            )));
        }
        if self.model_name.trim().is_empty() {
            return Err(CoreError::Config("model name is empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CoreError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Load settings from environment variables
    ///
    /// Reads:
    /// - `PROMPTTUNE_OLLAMA_ENDPOINT` or `OLLAMA_HOST` → ollama_endpoint
    /// - `PROMPTTUNE_MODEL` → model_name
    /// - `PROMPTTUNE_TEMPERATURE` → temperature (ignored if unparsable)
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(endpoint) = std::env::var("PROMPTTUNE_OLLAMA_ENDPOINT")
            .or_else(|_| std::env::var("OLLAMA_HOST"))
        {
            settings = settings.with_endpoint(endpoint);
        }

        if let Ok(model) = std::env::var("PROMPTTUNE_MODEL") {
            settings.model_name = model;
        }

        if let Ok(temperature) = std::env::var("PROMPTTUNE_TEMPERATURE") {
            if let Ok(val) = temperature.parse::<f32>() {
                settings.temperature = val;
            } else {
                tracing::warn!(value = %temperature, "ignoring unparsable PROMPTTUNE_TEMPERATURE");
            }
        }

        settings
    }
}
