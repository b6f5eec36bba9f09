//! prompttune-llm: inference client, prompt templates, the shared optimizer
//! service and the extension message handler.
//!
//! Every caller (HTTP route, message handler, CLI) goes through one
//! [`PromptOptimizer`] built around an injected [`ModelClient`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use prompttune_core::Settings;
//! use prompttune_llm::{OllamaClient, PromptOptimizer};
//!
//! # async fn run() -> prompttune_llm::Result<()> {
//! let optimizer = PromptOptimizer::new(Arc::new(OllamaClient::new()));
//! let result = optimizer.optimize("write story", &Settings::default()).await?;
//! println!("{}", result.optimized);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod handler;
mod optimizer;
mod prompt;
mod types;

pub use client::{ModelClient, OllamaClient, DEFAULT_TIMEOUT_SECS};
pub use error::{LlmError, Result};
pub use handler::{ExtensionRequest, ExtensionResponse, MessageHandler};
pub use optimizer::PromptOptimizer;
pub use prompt::{build_chat_request, user_message, SYSTEM_PROMPT};
pub use types::{ChatMessage, ChatRequest, ConnectionStatus, GenerationOptions, ModelTag, Role};
