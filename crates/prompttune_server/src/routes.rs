//! Route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use prompttune_core::timestamp_now;
use prompttune_llm::ExtensionResponse;
use serde_json::{json, Value};
use tracing::Instrument;

use crate::AppState;

const SERVICE_NAME: &str = "Prompt Optimizer API";
const AVAILABLE_ROUTES: &[&str] = &["GET /", "GET /health", "POST /optimize", "POST /message"];

pub(crate) async fn docs() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API to optimize prompts using a local Ollama instance",
        "endpoints": {
            "GET /": "API documentation",
            "GET /health": "Health check",
            "POST /optimize": "Optimize a prompt",
            "POST /message": "Extension message (checkOllamaConnection, optimizePrompt, insertTextIntoPage)"
        },
        "usage": {
            "endpoint": "POST /optimize",
            "body": {
                "prompt": "string (required) - The prompt to optimize"
            },
            "example": {
                "request": { "prompt": "write story" },
                "response": {
                    "success": true,
                    "original": "write story",
                    "optimized": "Write a compelling short story with a clear beginning, middle, and end, focusing on character development and vivid descriptions.",
                    "timestamp": "2024-01-01T12:00:00.000Z"
                }
            }
        }
    }))
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": timestamp_now(),
    }))
}

/// Why a `/optimize` body was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromptRejection {
    InvalidJson,
    Missing,
    InvalidType,
    Empty,
}

impl IntoResponse for PromptRejection {
    fn into_response(self) -> Response {
        let (error, message) = match self {
            PromptRejection::InvalidJson => ("Invalid JSON", "Request body must be valid JSON"),
            PromptRejection::Missing => (
                "Missing required field: prompt",
                "Please provide a prompt to optimize",
            ),
            PromptRejection::InvalidType => ("Invalid input type", "Prompt must be a string"),
            PromptRejection::Empty => ("Empty prompt", "Prompt cannot be empty"),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": error, "message": message })),
        )
            .into_response()
    }
}

/// Pull a usable prompt out of a request body.
///
/// Falsy values (absent, null, "", false, 0) count as missing; other non-strings
/// are the wrong type; whitespace-only strings are empty.
pub(crate) fn extract_prompt(body: &[u8]) -> Result<String, PromptRejection> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(|_| PromptRejection::InvalidJson)?
    };

    let prompt = match value.get("prompt") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return Err(PromptRejection::Missing)
        }
        Some(Value::String(s)) if s.is_empty() => return Err(PromptRejection::Missing),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return Err(PromptRejection::Missing),
        Some(Value::String(s)) => s,
        Some(_) => return Err(PromptRejection::InvalidType),
    };

    if prompt.trim().is_empty() {
        return Err(PromptRejection::Empty);
    }
    Ok(prompt.clone())
}

pub(crate) async fn optimize(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let prompt = match extract_prompt(&body) {
        Ok(prompt) => prompt,
        Err(rejection) => {
            tracing::debug!(?rejection, "rejected optimize request");
            return rejection.into_response();
        }
    };

    tracing::info!(prompt = %prompt, "Optimizing prompt");

    let span = prompttune_observability::optimize_span!("http", state.settings.model_name.as_str());
    let started = Instant::now();
    let result = state
        .optimizer
        .optimize(&prompt, &state.settings)
        .instrument(span.clone())
        .await;
    span.record("duration_ms", started.elapsed().as_millis() as u64);

    match result {
        Ok(optimization) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "original": optimization.original,
                "optimized": optimization.optimized,
                "timestamp": optimization.timestamp,
            })),
        )
            .into_response(),
        Err(e) => {
            span.in_scope(|| prompttune_observability::record_error(&e));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Internal server error",
                    "message": "Failed to optimize prompt. Please check if Ollama is running.",
                    "timestamp": timestamp_now(),
                })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn message(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ExtensionResponse::failed("Invalid JSON")),
            )
                .into_response()
        }
    };

    let response = state.messages.handle_value(value).await;
    Json(response).into_response()
}

pub(crate) async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("Route {} {} not found", method, uri.path()),
            "availableRoutes": AVAILABLE_ROUTES,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prompt_accepts_string() {
        assert_eq!(
            extract_prompt(br#"{"prompt":"write story"}"#),
            Ok("write story".to_string())
        );
    }

    #[test]
    fn test_extract_prompt_missing_variants() {
        let bodies: [&[u8]; 7] = [
            b"",
            br#"{}"#,
            br#"{"prompt":null}"#,
            br#"{"prompt":""}"#,
            br#"{"prompt":false}"#,
            br#"{"prompt":0}"#,
            br#"["prompt"]"#,
        ];
        for body in bodies {
            assert_eq!(extract_prompt(body), Err(PromptRejection::Missing));
        }
    }

    #[test]
    fn test_extract_prompt_wrong_type() {
        assert_eq!(
            extract_prompt(br#"{"prompt":42}"#),
            Err(PromptRejection::InvalidType)
        );
        assert_eq!(
            extract_prompt(br#"{"prompt":["a"]}"#),
            Err(PromptRejection::InvalidType)
        );
        assert_eq!(
            extract_prompt(br#"{"prompt":true}"#),
            Err(PromptRejection::InvalidType)
        );
    }

    #[test]
    fn test_extract_prompt_blank_is_empty() {
        assert_eq!(
            extract_prompt(br#"{"prompt":"   \n"}"#),
            Err(PromptRejection::Empty)
        );
    }

    #[test]
    fn test_extract_prompt_invalid_json() {
        assert_eq!(
            extract_prompt(b"{prompt:"),
            Err(PromptRejection::InvalidJson)
        );
    }
}
