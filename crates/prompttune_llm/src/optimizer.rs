//! The one optimize-and-normalize path every caller shares.

use std::sync::Arc;
use std::time::Instant;

use prompttune_core::{normalize, Optimization, Settings};

use crate::client::ModelClient;
use crate::error::{LlmError, Result};
use crate::prompt::build_chat_request;
use crate::types::ConnectionStatus;

#[derive(Clone)]
pub struct PromptOptimizer {
    client: Arc<dyn ModelClient>,
}

impl PromptOptimizer {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Ask the model for a rewrite of `prompt` and normalize its answer.
    ///
    /// One request, no retry. The normalizer only ever sees a successful reply.
    pub async fn optimize(&self, prompt: &str, settings: &Settings) -> Result<Optimization> {
        if prompt.trim().is_empty() {
            return Err(LlmError::EmptyPrompt);
        }
        settings.validate()?;

        let started = Instant::now();
        let request = build_chat_request(prompt, settings);
        let raw = self.client.chat(settings.endpoint(), &request).await?;
        let optimized = normalize(&raw);

        tracing::info!(
            model = %settings.model_name,
            prompt_chars = prompt.chars().count(),
            raw_chars = raw.chars().count(),
            optimized_chars = optimized.chars().count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "prompt optimized"
        );

        if optimized.is_empty() {
            tracing::warn!(model = %settings.model_name, "model reply was empty after normalization");
        }

        Ok(Optimization::new(prompt, optimized))
    }

    /// List the models at the configured endpoint.
    pub async fn check_connection(&self, settings: &Settings) -> Result<ConnectionStatus> {
        let endpoint = settings.endpoint().to_string();
        let models = self.client.list_models(&endpoint).await?;
        tracing::debug!(endpoint = %endpoint, models = models.len(), "ollama reachable");
        Ok(ConnectionStatus { endpoint, models })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatRequest, ModelTag};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock client that replays a canned reply and records requests.
    struct MockClient {
        reply: std::result::Result<String, u16>,
        calls: AtomicUsize,
        last: Mutex<Option<(String, ChatRequest)>>,
    }

    impl MockClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ModelClient for MockClient {
        async fn chat(&self, endpoint: &str, request: &ChatRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((endpoint.to_string(), request.clone()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    body: "boom".to_string(),
                }),
            }
        }

        async fn list_models(&self, _endpoint: &str) -> Result<Vec<ModelTag>> {
            Ok(vec![ModelTag {
                name: "llama2:latest".to_string(),
                size: None,
                modified_at: None,
            }])
        }
    }

    #[tokio::test]
    async fn test_optimize_normalizes_reply() {
        let client = Arc::new(MockClient::replying(
            "Here's an optimized prompt: \"Explain gravity simply\"",
        ));
        let optimizer = PromptOptimizer::new(client.clone());

        let result = optimizer
            .optimize("explain gravity", &Settings::default())
            .await
            .unwrap();

        assert_eq!(result.original, "explain gravity");
        assert_eq!(result.optimized, "Explain gravity simply");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_optimize_passes_settings_through() {
        let client = Arc::new(MockClient::replying("ok"));
        let optimizer = PromptOptimizer::new(client.clone());
        let settings = Settings::default()
            .with_endpoint("http://gpu-box:11434/")
            .with_model("mistral")
            .with_temperature(0.6);

        optimizer.optimize("hello", &settings).await.unwrap();

        let (endpoint, request) = client.last.lock().unwrap().clone().unwrap();
        assert_eq!(endpoint, "http://gpu-box:11434");
        assert_eq!(request.model, "mistral");
        assert_eq!(request.options.temperature, 0.6);
    }

    #[tokio::test]
    async fn test_blank_prompt_never_reaches_client() {
        let client = Arc::new(MockClient::replying("unused"));
        let optimizer = PromptOptimizer::new(client.clone());

        let err = optimizer.optimize("   ", &Settings::default()).await.unwrap_err();

        assert!(matches!(err, LlmError::EmptyPrompt));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected_before_call() {
        let client = Arc::new(MockClient::replying("unused"));
        let optimizer = PromptOptimizer::new(client.clone());
        let settings = Settings::default().with_temperature(9.0);

        let err = optimizer.optimize("hello", &settings).await.unwrap_err();

        assert!(matches!(err, LlmError::InvalidSettings(_)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_client_failure_propagates() {
        let optimizer = PromptOptimizer::new(Arc::new(MockClient::failing(500)));
        let err = optimizer.optimize("hello", &Settings::default()).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_check_connection_reports_models() {
        let optimizer = PromptOptimizer::new(Arc::new(MockClient::replying("")));
        let status = optimizer.check_connection(&Settings::default()).await.unwrap();
        assert_eq!(status.endpoint, "http://localhost:11434");
        assert!(status.has_model("llama2"));
    }
}
