//! Destinations for an optimized prompt.
//!
//! Outside a browser there is no focused text field to write into, so callers
//! receive a [`TextSink`] instead and report what it said.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{CoreError, Result};

/// What happened when text was handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SinkOutcome {
    /// Text was written; `target` names where it went
    Written { target: String },
    /// No destination was available
    NotFound,
}

pub trait TextSink: Send + Sync {
    /// Short identifier used in logs and responses.
    fn name(&self) -> &str;

    fn write(&self, text: &str) -> Result<SinkOutcome>;
}

/// Prints the text to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl TextSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    fn write(&self, text: &str) -> Result<SinkOutcome> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{text}")?;
        Ok(SinkOutcome::Written {
            target: "stdout".to_string(),
        })
    }
}

/// Replaces the contents of a file, like assigning `value` on an input.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TextSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&self, text: &str) -> Result<SinkOutcome> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                return Ok(SinkOutcome::NotFound);
            }
            _ => {}
        }
        std::fs::write(&self.path, text).map_err(|e| CoreError::SinkFailed {
            target: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "wrote prompt to file");
        Ok(SinkOutcome::Written {
            target: self.path.display().to_string(),
        })
    }
}

/// Keeps the most recent text in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    last: Mutex<Option<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl TextSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn write(&self, text: &str) -> Result<SinkOutcome> {
        let mut guard = self.last.lock().map_err(|_| CoreError::SinkFailed {
            target: "memory".to_string(),
            message: "lock poisoned".to_string(),
        })?;
        *guard = Some(text.to_string());
        Ok(SinkOutcome::Written {
            target: "memory".to_string(),
        })
    }
}

/// Has nowhere to put text.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TextSink for NullSink {
    fn name(&self) -> &str {
        "none"
    }

    fn write(&self, _text: &str) -> Result<SinkOutcome> {
        Ok(SinkOutcome::NotFound)
    }
}
