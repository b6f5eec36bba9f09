//! `prompttune check`: is Ollama up, and does it have the model?

use anyhow::{Context, Result};
use prompttune_core::Settings;
use prompttune_llm::PromptOptimizer;

use crate::output;

pub async fn handle(optimizer: PromptOptimizer, settings: Settings) -> Result<()> {
    let spinner = output::spinner(&format!("Connecting to {}...", settings.endpoint()));
    let status = match optimizer.check_connection(&settings).await {
        Ok(status) => status,
        Err(e) => {
            output::spinner_error(&spinner, "Ollama is not reachable");
            return Err(e).with_context(|| {
                format!("Could not connect to Ollama at {}", settings.endpoint())
            });
        }
    };
    output::spinner_success(
        &spinner,
        &format!("Connected to {} ({} models)", status.endpoint, status.models.len()),
    );

    if output::is_json() {
        output::data("connection", &status, "");
    } else if !status.models.is_empty() {
        let mut table = output::table(&["Model", "Size", "Modified"]);
        for model in &status.models {
            output::table_row(
                &mut table,
                &model.name,
                &[
                    model.size.map(format_size).unwrap_or_default(),
                    model.modified_at.clone().unwrap_or_default(),
                ],
            );
        }
        println!("{table}");
    }

    if status.has_model(&settings.model_name) {
        output::success(&format!("Model '{}' is available", settings.model_name));
    } else {
        output::warning(&format!(
            "Model '{}' not found. Pull it with: ollama pull {}",
            settings.model_name, settings.model_name
        ));
    }
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else {
        format!("{:.0} MB", bytes / MB)
    }
}
