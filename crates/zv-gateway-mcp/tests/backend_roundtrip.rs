// crates/zv-gateway-mcp/tests/backend_roundtrip.rs
// ============================================================================
// Module: Backend Roundtrip Tests
// Description: Integration tests for tool dispatch against a stub backend.
// Purpose: Verify wire shapes end to end: method, path, query, body, auth.
// ============================================================================

//! ## Overview
//! Drives the tool router against a local `tiny_http` stub and asserts the
//! exact HTTP surface the backend sees for each payload policy, plus the
//! soft-error translation of non-success statuses.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use std::sync::mpsc;
use std::thread;

use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use zv_gateway_config::BackendConfig;
use zv_gateway_mcp::BackendClient;
use zv_gateway_mcp::ToolError;
use zv_gateway_mcp::ToolRouter;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// One request as observed by the stub backend.
struct RecordedRequest {
    method: String,
    url: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Spawns a stub backend answering the given `(status, body)` responses in
/// order, recording each request it serves.
fn spawn_backend(
    responses: Vec<(u16, String)>,
) -> (String, mpsc::Receiver<RecordedRequest>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base_url = format!("http://{addr}");
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                return;
            };
            let mut payload = Vec::new();
            let _ = request.as_reader().read_to_end(&mut payload);
            let header_value = |name: &str| {
                request
                    .headers()
                    .iter()
                    .find(|header| header.field.as_str().as_str().eq_ignore_ascii_case(name))
                    .map(|header| header.value.as_str().to_string())
            };
            let authorization = header_value("authorization");
            let content_type = header_value("content-type");
            let recorded = RecordedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
                content_type,
                body: payload,
            };
            let _ = tx.send(recorded);
            let json_header =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response =
                Response::from_string(body).with_status_code(status).with_header(json_header);
            let _ = request.respond(response);
        }
    });
    (base_url, rx, handle)
}

/// Builds a router against the stub backend.
fn stub_router(base_url: &str, api_token: Option<&str>) -> ToolRouter {
    let config = BackendConfig {
        base_url: base_url.to_string(),
        api_token: api_token.map(str::to_string),
        timeout_ms: 5_000,
        ..BackendConfig::default()
    };
    ToolRouter::new(BackendClient::new(&config).unwrap()).unwrap()
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

#[tokio::test]
async fn listing_records_sends_get_with_query_and_bearer() {
    let (base_url, rx, handle) =
        spawn_backend(vec![(200, json!({ "memories": ["m-1", "m-2"] }).to_string())]);
    let router = stub_router(&base_url, Some("zv-secret"));
    let result = router
        .handle_tool_call(
            "list_memories",
            json!({ "agent_id": "agent-1", "memory_type": "episodic", "limit": 10 }),
        )
        .await
        .unwrap();
    handle.join().unwrap();
    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.url, "/api/memory/agent-1/memories?limit=10&memory_type=episodic");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer zv-secret"));
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert!(seen.body.is_empty());
    assert!(!result.is_error);
    assert!(result.content[0].text.contains("m-1"));
}

#[tokio::test]
async fn path_substitution_strips_the_key_from_the_body() {
    let (base_url, rx, handle) = spawn_backend(vec![(200, json!({ "ok": true }).to_string())]);
    let router = stub_router(&base_url, None);
    let result = router
        .handle_tool_call("update_agent", json!({ "agent_id": "agent-7", "name": "Scout" }))
        .await
        .unwrap();
    handle.join().unwrap();
    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "PATCH");
    assert_eq!(seen.url, "/api/agents/agent-7");
    let body: Value = serde_json::from_slice(&seen.body).unwrap();
    assert_eq!(body, json!({ "name": "Scout" }));
    assert!(!result.is_error);
}

#[tokio::test]
async fn pure_path_post_carries_no_body() {
    let (base_url, rx, handle) = spawn_backend(vec![(200, json!({ "ok": true }).to_string())]);
    let router = stub_router(&base_url, None);
    let result = router
        .handle_tool_call("activate_agent", json!({ "agent_id": "agent-7" }))
        .await
        .unwrap();
    handle.join().unwrap();
    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/api/agents/agent-7/activate");
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert!(seen.body.is_empty());
    assert!(!result.is_error);
}

#[tokio::test]
async fn no_bearer_header_without_a_token() {
    let (base_url, rx, handle) =
        spawn_backend(vec![(200, json!({ "agent_id": "agent-1" }).to_string())]);
    let router = stub_router(&base_url, None);
    let result =
        router.handle_tool_call("get_agent", json!({ "agent_id": "agent-1" })).await.unwrap();
    handle.join().unwrap();
    let seen = rx.recv().unwrap();
    assert!(seen.authorization.is_none());
    assert!(!result.is_error);
    assert!(result.content[0].text.contains("agent-1"));
}

#[tokio::test]
async fn coordination_sync_sends_the_agent_list_as_the_body() {
    let (base_url, rx, handle) = spawn_backend(vec![(200, json!({ "ok": true }).to_string())]);
    let router = stub_router(&base_url, None);
    let result = router
        .handle_tool_call(
            "synchronize_coordination",
            json!({ "agent_ids": ["agent-1", "agent-2"], "coordination_strategy": "consensus" }),
        )
        .await
        .unwrap();
    handle.join().unwrap();
    let seen = rx.recv().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/api/orchestration/coordination/sync?coordination_strategy=consensus");
    let body: Value = serde_json::from_slice(&seen.body).unwrap();
    assert_eq!(body, json!(["agent-1", "agent-2"]));
    assert!(!result.is_error);
}

// ============================================================================
// SECTION: Error Translation
// ============================================================================

#[tokio::test]
async fn non_success_status_becomes_a_soft_error() {
    let (base_url, rx, handle) =
        spawn_backend(vec![(500, json!({ "detail": "storage offline" }).to_string())]);
    let router = stub_router(&base_url, None);
    let result =
        router.handle_tool_call("get_agent", json!({ "agent_id": "agent-1" })).await.unwrap();
    handle.join().unwrap();
    rx.recv().unwrap();
    assert!(result.is_error);
    assert!(result.content[0].text.contains("500"));
    assert!(result.content[0].text.contains("storage offline"));
}

#[tokio::test]
async fn not_found_status_becomes_a_soft_error() {
    let (base_url, rx, handle) =
        spawn_backend(vec![(404, json!({ "detail": "agent missing" }).to_string())]);
    let router = stub_router(&base_url, None);
    let result =
        router.handle_tool_call("get_agent", json!({ "agent_id": "agent-9" })).await.unwrap();
    handle.join().unwrap();
    rx.recv().unwrap();
    assert!(result.is_error);
    assert!(result.content[0].text.contains("agent missing"));
}

#[tokio::test]
async fn unknown_tool_never_reaches_the_backend() {
    let (base_url, rx, handle) = spawn_backend(vec![]);
    let router = stub_router(&base_url, None);
    let error = router.handle_tool_call("summon_demon", json!({})).await.unwrap_err();
    assert_eq!(error, ToolError::UnknownTool { name: String::from("summon_demon") });
    handle.join().unwrap();
    assert!(rx.try_recv().is_err());
}
