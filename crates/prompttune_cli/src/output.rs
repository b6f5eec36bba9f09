//! Terminal output helpers: styled text for humans, one JSON object per line for scripts.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the model listing
//! - `indicatif` for spinners while waiting on the model

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    JSON_MODE.store(matches!(format, OutputFormat::Json), Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn to_json_line(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg)
        .unwrap_or_else(|_| format!("{{\"level\":\"{level}\",\"message\":\"{message}\"}}"))
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", to_json_line(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", to_json_line("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Emit a serializable value; text mode prints `text` instead.
pub fn data<T: Serialize>(label: &str, value: &T, text: &str) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        println!("{text}");
    }
}

// ── Tables ─────────────────────────────────────────────────────────

pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| {
            Cell::new(h)
                .fg(Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)
        }));
    table
}

pub fn table_row(table: &mut Table, first: &str, rest: &[String]) {
    let mut cells = vec![Cell::new(first).fg(Color::Green)];
    cells.extend(rest.iter().map(Cell::new));
    table.add_row(cells);
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub fn spinner_success(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    success(message);
}

pub fn spinner_error(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    error(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_shape() {
        let data = serde_json::json!({ "optimized": "Write a haiku" });
        let line = to_json_line("data", "optimization", Some(&data));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "data");
        assert_eq!(parsed["message"], "optimization");
        assert_eq!(parsed["data"]["optimized"], "Write a haiku");
    }

    #[test]
    fn test_json_line_omits_missing_data() {
        let line = to_json_line("info", "hello", None);
        assert_eq!(line, r#"{"level":"info","message":"hello"}"#);
    }
}
