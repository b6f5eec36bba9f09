//! Result of one optimization round trip.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    /// Prompt as the user wrote it
    pub original: String,
    /// Normalized model rewrite
    pub optimized: String,
    /// RFC 3339 UTC, millisecond precision
    pub timestamp: String,
}

impl Optimization {
    pub fn new(original: impl Into<String>, optimized: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            optimized: optimized.into(),
            timestamp: timestamp_now(),
        }
    }
}

/// Current time formatted like JavaScript's `toISOString()`.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
