//! prompttune-server: local HTTP API for prompt optimization.
//!
//! Routes:
//! - `GET /`: API documentation
//! - `GET /health`: liveness
//! - `POST /optimize`: `{ "prompt": "..." }` → optimized prompt
//! - `POST /message`: extension-style `{ "action": ... }` messages
//!
//! Every response carries permissive CORS headers so a browser extension can
//! call the server from any page.

pub mod config;
pub mod error;
mod middleware;
mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use prompttune_core::{Settings, TextSink};
use prompttune_llm::{MessageHandler, PromptOptimizer};

pub use config::ServerConfig;
pub use error::{Result, ServerError};

/// Shared handler state. Settings are fixed at startup and passed explicitly.
pub struct AppState {
    pub optimizer: PromptOptimizer,
    pub settings: Settings,
    pub messages: MessageHandler,
}

impl AppState {
    pub fn new(optimizer: PromptOptimizer, settings: Settings, sink: Arc<dyn TextSink>) -> Self {
        let messages = MessageHandler::new(optimizer.clone(), settings.clone(), sink);
        Self {
            optimizer,
            settings,
            messages,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::docs))
        .route("/health", get(routes::health))
        .route("/optimize", post(routes::optimize))
        .route("/message", post(routes::message))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(axum::middleware::from_fn(middleware::cors))
        .layer(axum::middleware::from_fn(middleware::trace_request))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig, state: Arc<AppState>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind { addr, source: e })?;
    let local = listener.local_addr()?;

    tracing::info!(
        addr = %local,
        ollama = %state.settings.ollama_endpoint,
        model = %state.settings.model_name,
        "Prompt Optimizer API listening"
    );
    tracing::info!("Health check: http://{}/health", local);
    tracing::info!("Optimize endpoint: POST http://{}/optimize", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
