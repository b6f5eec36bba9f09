//! Core error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Sink '{target}' failed: {message}")]
    SinkFailed { target: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
