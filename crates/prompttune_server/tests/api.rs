//! HTTP API tests: the router is served on an ephemeral port and exercised with reqwest.
//!
//! Run with: cargo test -p prompttune-server --test api

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use prompttune_core::{MemorySink, Settings};
use prompttune_llm::{ChatRequest, LlmError, ModelClient, ModelTag, PromptOptimizer};
use prompttune_server::{router, AppState};
use serde_json::{json, Value};

/// Mock Ollama: replies with a fixed preamble, or fails when the prompt says so.
struct ScriptedClient;

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn chat(&self, _endpoint: &str, request: &ChatRequest) -> prompttune_llm::Result<String> {
        let user = &request.messages[1].content;
        if user.contains("offline") {
            return Err(LlmError::Api {
                status: 503,
                body: "ollama is not running".to_string(),
            });
        }
        Ok("Optimized prompt: \"Write a compelling short story.\"".to_string())
    }

    async fn list_models(&self, _endpoint: &str) -> prompttune_llm::Result<Vec<ModelTag>> {
        Ok(vec![ModelTag {
            name: "llama2:latest".to_string(),
            size: None,
            modified_at: None,
        }])
    }
}

async fn spawn_server(sink: Arc<MemorySink>) -> Result<SocketAddr> {
    let optimizer = PromptOptimizer::new(Arc::new(ScriptedClient));
    let state = Arc::new(AppState::new(optimizer, Settings::default(), sink));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });
    Ok(addr)
}

async fn start() -> Result<(String, Arc<MemorySink>)> {
    let sink = Arc::new(MemorySink::new());
    let addr = spawn_server(sink.clone()).await?;
    Ok((format!("http://{}", addr), sink))
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::get(format!("{}/health", base)).await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Prompt Optimizer API");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_docs_lists_endpoints() -> Result<()> {
    let (base, _) = start().await?;
    let body: Value = reqwest::get(format!("{}/", base)).await?.json().await?;
    assert_eq!(body["name"], "Prompt Optimizer API");
    assert!(body["endpoints"]["POST /optimize"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_optimize_success() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/optimize", base))
        .json(&json!({ "prompt": "write story" }))
        .send()
        .await?;

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["original"], "write story");
    assert_eq!(body["optimized"], "Write a compelling short story.");
    Ok(())
}

#[tokio::test]
async fn test_optimize_validation_errors() -> Result<()> {
    let (base, _) = start().await?;
    let client = reqwest::Client::new();

    let cases = [
        (json!({}), "Missing required field: prompt"),
        (json!({ "prompt": 42 }), "Invalid input type"),
        (json!({ "prompt": "   " }), "Empty prompt"),
    ];

    for (payload, expected) in cases {
        let res = client
            .post(format!("{}/optimize", base))
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), 400, "payload {}", payload);
        let body: Value = res.json().await?;
        assert_eq!(body["error"], expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_optimize_inference_failure_is_500() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/optimize", base))
        .json(&json!({ "prompt": "offline please" }))
        .send()
        .await?;

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(
        body["message"],
        "Failed to optimize prompt. Please check if Ollama is running."
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_json_404() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::get(format!("{}/nope", base)).await?;
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["message"], "Route GET /nope not found");
    assert!(body["availableRoutes"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_wrong_method_on_known_route_is_json_404() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::get(format!("{}/optimize", base)).await?;
    assert_eq!(res.status(), 404);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["message"], "Route GET /optimize not found");
    assert!(body["availableRoutes"].is_array());

    let res = reqwest::Client::new()
        .delete(format!("{}/health", base))
        .send()
        .await?;
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Route DELETE /health not found");
    Ok(())
}

#[tokio::test]
async fn test_preflight_options_is_ok() -> Result<()> {
    let (base, _) = start().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/optimize", base))
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let methods = res
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(methods.contains("POST"));
    Ok(())
}

#[tokio::test]
async fn test_message_endpoint_dispatches_actions() -> Result<()> {
    let (base, sink) = start().await?;
    let client = reqwest::Client::new();

    let optimized: Value = client
        .post(format!("{}/message", base))
        .json(&json!({ "action": "optimizePrompt", "prompt": "write story" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(optimized["success"], true);
    assert_eq!(optimized["optimized"], "Write a compelling short story.");

    let inserted: Value = client
        .post(format!("{}/message", base))
        .json(&json!({ "action": "insertTextIntoPage", "text": "Write a compelling short story." }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(inserted["success"], true);
    assert_eq!(sink.last().as_deref(), Some("Write a compelling short story."));

    let connection: Value = client
        .post(format!("{}/message", base))
        .json(&json!({ "action": "checkOllamaConnection" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(connection["success"], true);
    assert_eq!(connection["models"][0]["name"], "llama2:latest");

    let unknown: Value = client
        .post(format!("{}/message", base))
        .json(&json!({ "action": "selfDestruct" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(unknown["success"], false);
    assert_eq!(unknown["error"], "Unknown action");
    Ok(())
}
