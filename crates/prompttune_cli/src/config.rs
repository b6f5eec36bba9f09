//! Environment loading and settings resolution.
//!
//! Precedence, highest first: CLI flags, process environment, project `.env`,
//! `~/.prompttune/env`, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prompttune_core::Settings;

use crate::cli::SettingsArgs;

pub const DATA_DIR: &str = ".prompttune";

/// Load `.env` files without overriding variables that are already set.
pub fn load_env_files() {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(env_file) = find_upwards(&cwd, ".env") {
            let _ = dotenvy::from_path(&env_file);
        }
    }
    if let Some(home) = dirs::home_dir() {
        let global = home.join(DATA_DIR).join("env");
        if global.exists() {
            let _ = dotenvy::from_path(&global);
        }
    }
}

/// Closest `name` in `start` or one of its parents.
fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Environment settings with CLI flags applied on top.
pub fn resolve_settings(args: &SettingsArgs) -> Result<Settings> {
    apply_overrides(Settings::from_env(), args)
}

fn apply_overrides(mut settings: Settings, args: &SettingsArgs) -> Result<Settings> {
    if let Some(endpoint) = &args.endpoint {
        settings = settings.with_endpoint(endpoint.clone());
    }
    if let Some(model) = &args.model {
        settings = settings.with_model(model.clone());
    }
    if let Some(temperature) = args.temperature {
        settings = settings.with_temperature(temperature);
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}
