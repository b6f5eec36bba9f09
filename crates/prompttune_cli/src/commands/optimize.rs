//! `prompttune optimize`: one-shot prompt rewrite.

use std::path::PathBuf;

use anyhow::{Context, Result};
use prompttune_core::{FileSink, Settings, SinkOutcome, StdoutSink, TextSink};
use prompttune_llm::PromptOptimizer;

use crate::output;

pub async fn handle(
    optimizer: PromptOptimizer,
    settings: Settings,
    prompt: Vec<String>,
    write: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let prompt = prompt.join(" ");

    let spinner = if quiet {
        indicatif::ProgressBar::hidden()
    } else {
        output::spinner(&format!("Optimizing with {}...", settings.model_name))
    };
    let optimization = match optimizer.optimize(&prompt, &settings).await {
        Ok(optimization) => {
            spinner.finish_and_clear();
            optimization
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).context("Failed to optimize prompt. Is Ollama running?");
        }
    };

    if quiet && !output::is_json() {
        StdoutSink.write(&optimization.optimized)?;
    } else if output::is_json() {
        output::data("optimization", &optimization, &optimization.optimized);
    } else {
        output::kv("Original: ", &optimization.original);
        output::kv("Optimized:", &optimization.optimized);
    }

    if let Some(path) = write {
        let sink = FileSink::new(&path);
        match sink.write(&optimization.optimized)? {
            SinkOutcome::Written { target } => {
                if !quiet {
                    output::success(&format!("Wrote {}", target));
                }
            }
            SinkOutcome::NotFound => {
                tracing::warn!(path = %path.display(), "parent directory missing, nothing written");
                output::warning(&format!("No suitable destination at {}", path.display()));
            }
        }
    }

    Ok(())
}
