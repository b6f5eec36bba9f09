//! `prompttune normalize`: clean model output offline.

use std::io::Read;

use anyhow::{Context, Result};
use prompttune_core::normalize;

use crate::output;

pub fn handle(text: Option<String>) -> Result<()> {
    let raw = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let cleaned = normalize(&raw);
    output::data(
        "normalized",
        &serde_json::json!({ "raw": raw, "normalized": cleaned }),
        &cleaned,
    );
    Ok(())
}
