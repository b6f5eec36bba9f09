//! Message handler for extension-style `{ "action": ... }` requests.
//!
//! Every failure becomes `{ "success": false, "error": ... }`; nothing here returns `Err`.

use std::sync::Arc;

use prompttune_core::{Optimization, Settings, SinkOutcome, TextSink};
use serde::{Deserialize, Serialize};

use crate::optimizer::PromptOptimizer;
use crate::types::ModelTag;

const ACTIONS: &[&str] = &["checkOllamaConnection", "optimizePrompt", "insertTextIntoPage"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ExtensionRequest {
    CheckOllamaConnection {
        #[serde(default)]
        endpoint: Option<String>,
    },
    OptimizePrompt {
        prompt: String,
        #[serde(default)]
        settings: Option<Settings>,
    },
    InsertTextIntoPage {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtensionResponse {
    Connection {
        success: bool,
        models: Vec<ModelTag>,
        endpoint: String,
    },
    Optimized {
        success: bool,
        #[serde(flatten)]
        optimization: Optimization,
    },
    Inserted {
        success: bool,
        target: String,
    },
    Failed {
        success: bool,
        error: String,
    },
}

impl ExtensionResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Connection { success, .. }
            | Self::Optimized { success, .. }
            | Self::Inserted { success, .. }
            | Self::Failed { success, .. } => *success,
        }
    }
}

#[derive(Clone)]
pub struct MessageHandler {
    optimizer: PromptOptimizer,
    settings: Settings,
    sink: Arc<dyn TextSink>,
}

impl MessageHandler {
    /// `settings` applies to requests that don't carry their own.
    pub fn new(optimizer: PromptOptimizer, settings: Settings, sink: Arc<dyn TextSink>) -> Self {
        Self {
            optimizer,
            settings,
            sink,
        }
    }

    /// Dispatch raw JSON, reporting unknown actions and bad payloads as failures.
    pub async fn handle_value(&self, value: serde_json::Value) -> ExtensionResponse {
        let action = value
            .get("action")
            .and_then(|a| a.as_str())
            .map(str::to_string);

        match action.as_deref() {
            Some(name) if ACTIONS.contains(&name) => {}
            other => {
                tracing::debug!(action = ?other, "unknown action");
                return ExtensionResponse::failed("Unknown action");
            }
        }

        match serde_json::from_value::<ExtensionRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => ExtensionResponse::failed(format!("Invalid request: {}", e)),
        }
    }

    pub async fn handle(&self, request: ExtensionRequest) -> ExtensionResponse {
        match request {
            ExtensionRequest::CheckOllamaConnection { endpoint } => {
                let settings = match endpoint {
                    Some(endpoint) => self.settings.clone().with_endpoint(endpoint),
                    None => self.settings.clone(),
                };
                match self.optimizer.check_connection(&settings).await {
                    Ok(status) => ExtensionResponse::Connection {
                        success: true,
                        models: status.models,
                        endpoint: status.endpoint,
                    },
                    Err(e) => ExtensionResponse::failed(e.to_string()),
                }
            }
            ExtensionRequest::OptimizePrompt { prompt, settings } => {
                let settings = settings.as_ref().unwrap_or(&self.settings);
                match self.optimizer.optimize(&prompt, settings).await {
                    Ok(optimization) => ExtensionResponse::Optimized {
                        success: true,
                        optimization,
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "optimizePrompt failed");
                        ExtensionResponse::failed(e.to_string())
                    }
                }
            }
            ExtensionRequest::InsertTextIntoPage { text } => match self.sink.write(&text) {
                Ok(SinkOutcome::Written { target }) => ExtensionResponse::Inserted {
                    success: true,
                    target,
                },
                Ok(SinkOutcome::NotFound) => {
                    ExtensionResponse::failed("No suitable text field found")
                }
                Err(e) => ExtensionResponse::failed(e.to_string()),
            },
        }
    }
}
