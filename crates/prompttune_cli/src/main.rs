//! CLI entry point for PromptTune.

mod cli;
mod commands;
mod config;
mod output;

use clap::Parser;

use crate::cli::{Cli, Command};

fn init_logging(cli: &Cli) {
    let mut config = prompttune_observability::ObservabilityConfig::from_env("prompttune-cli")
        .with_version(env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        // Keep one-shot commands quiet; the server logs requests.
        let level = match cli.command {
            Command::Serve { .. } => "info",
            _ => "warn",
        };
        config = config.with_log_level(level);
    }
    if let Err(e) = prompttune_observability::init(config) {
        eprintln!("logging disabled: {e}");
    }
}

#[tokio::main]
async fn main() {
    config::load_env_files();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(&cli);

    let result = commands::handle(cli).await;
    prompttune_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
