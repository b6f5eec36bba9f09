//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Rewrite prompts with a local Ollama model
#[derive(Parser, Debug)]
#[command(name = "prompttune", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Inference overrides, applied on top of the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Ollama base URL. Uses PROMPTTUNE_OLLAMA_ENDPOINT if not set.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Model to use (e.g. llama2, mistral). Uses PROMPTTUNE_MODEL if not set.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0. Uses PROMPTTUNE_TEMPERATURE if not set.
    #[arg(long, global = true)]
    pub temperature: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the model to rewrite a prompt
    Optimize {
        /// Prompt words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        /// Also write the optimized prompt to this file
        #[arg(short, long)]
        write: Option<PathBuf>,
        /// Print only the optimized prompt
        #[arg(short, long)]
        quiet: bool,
    },
    /// Clean raw model output (preamble phrases, wrapping quotes) without calling a model
    Normalize {
        /// Text to clean; read from stdin when omitted
        text: Option<String>,
    },
    /// Check that Ollama is reachable and the model is installed
    Check,
    /// Run the local HTTP API
    Serve {
        /// Port to listen on. Uses PORT if not set (default 3000).
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (default 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// File that receives text from insertTextIntoPage messages
        #[arg(long)]
        sink_file: Option<PathBuf>,
    },
}
