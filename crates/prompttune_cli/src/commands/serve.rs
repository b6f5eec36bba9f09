//! `prompttune serve`: run the HTTP API in the foreground.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use prompttune_core::{FileSink, MemorySink, Settings, TextSink};
use prompttune_llm::PromptOptimizer;
use prompttune_server::{AppState, ServerConfig};

use crate::output;

pub async fn handle(
    optimizer: PromptOptimizer,
    settings: Settings,
    port: Option<u16>,
    host: Option<String>,
    sink_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(host) = host {
        config = config.with_host(host);
    }

    let sink = build_sink(sink_file);

    output::header("Prompt Optimizer API");
    output::kv("Address:", &format!("http://{}:{}", config.host, config.port));
    output::kv("Ollama: ", settings.endpoint());
    output::kv("Model:  ", &settings.model_name);
    output::kv("Sink:   ", sink.name());
    output::dim("Press Ctrl-C to stop");

    tracing::debug!(
        host = %config.host,
        port = config.port,
        model = %settings.model_name,
        sink = sink.name(),
        "starting server"
    );
    let state = Arc::new(AppState::new(optimizer, settings, sink));
    prompttune_server::serve(config, state)
        .await
        .context("server exited with an error")
}

/// Where `insertTextIntoPage` text goes: the given file, or memory.
fn build_sink(sink_file: Option<PathBuf>) -> Arc<dyn TextSink> {
    match sink_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "insertTextIntoPage writes to file");
            Arc::new(FileSink::new(path))
        }
        None => Arc::new(MemorySink::new()),
    }
}
