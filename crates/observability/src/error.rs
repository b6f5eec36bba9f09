//! Observability errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error("Failed to build OTLP exporter: {0}")]
    Exporter(String),

    /// Another global subscriber won the race
    #[error("Subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, ObservabilityError>;
