//! Command dispatch.

pub mod check;
pub mod normalize;
pub mod optimize;
pub mod serve;

use std::sync::Arc;

use anyhow::Result;
use prompttune_llm::{OllamaClient, PromptOptimizer};

use crate::cli::{Cli, Command};
use crate::config::resolve_settings;

fn build_optimizer() -> PromptOptimizer {
    PromptOptimizer::new(Arc::new(OllamaClient::from_env()))
}

pub async fn handle(cli: Cli) -> Result<()> {
    let Cli {
        command, settings, ..
    } = cli;

    match command {
        Command::Normalize { text } => normalize::handle(text),
        Command::Optimize {
            prompt,
            write,
            quiet,
        } => {
            let settings = resolve_settings(&settings)?;
            optimize::handle(build_optimizer(), settings, prompt, write, quiet).await
        }
        Command::Check => check::handle(build_optimizer(), resolve_settings(&settings)?).await,
        Command::Serve {
            port,
            host,
            sink_file,
        } => {
            let settings = resolve_settings(&settings)?;
            serve::handle(build_optimizer(), settings, port, host, sink_file).await
        }
    }
}
