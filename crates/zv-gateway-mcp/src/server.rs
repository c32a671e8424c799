// crates/zv-gateway-mcp/src/server.rs
// ============================================================================
// Module: Gateway Stdio Server
// Description: Content-Length framed JSON-RPC 2.0 server over stdin/stdout.
// Purpose: Serve initialize, tools/list, and tools/call with graceful drain.
// Dependencies: zv-gateway-config, tools, telemetry, tokio, serde_json
// ============================================================================

//! ## Overview
//! The server reads one framed JSON-RPC message at a time and spawns each
//! `tools/call` as its own task, so a slow backend call never blocks the
//! read loop and in-flight calls interleave freely. Responses from all tasks
//! funnel through a single writer task, which keeps output frames from
//! tearing; response order is not guaranteed and ids provide correlation.
//! On SIGINT, SIGTERM, or stdin EOF the server stops reading and waits for
//! in-flight calls up to the configured grace window before exiting.
//! Security posture: inbound frames are untrusted and size-capped before
//! parsing; oversized frames are discarded to stay in sync and answered
//! with a payload-too-large error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use zv_gateway_config::GatewayConfig;
use zv_gateway_core::CatalogError;
use zv_gateway_core::ToolName;

use crate::client::BackendClient;
use crate::client::BackendError;
use crate::telemetry::GatewayMethod;
use crate::telemetry::GatewayMetricEvent;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::GatewayOutcome;
use crate::tools::ToolError;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON-RPC parse error code.
pub const PARSE_ERROR: i64 = -32700;

/// JSON-RPC invalid request code.
pub const INVALID_REQUEST: i64 = -32600;

/// JSON-RPC method-not-found code; also used for unknown tools.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// JSON-RPC invalid params code.
pub const INVALID_PARAMS: i64 = -32602;

/// JSON-RPC internal error code.
pub const INTERNAL_ERROR: i64 = -32603;

/// Implementation-defined code for frames above the size limit.
pub const PAYLOAD_TOO_LARGE: i64 = -32070;

/// MCP protocol revision announced during initialize.
const PROTOCOL_VERSION: &str = "2025-06-18";

/// Maximum accepted header line length in bytes.
const MAX_HEADER_LINE_BYTES: usize = 8_192;

/// Maximum accepted header lines per frame.
const MAX_HEADER_LINES: usize = 32;

/// Chunk size used when discarding oversized payloads.
const DISCARD_CHUNK_BYTES: usize = 8_192;

/// Depth of the response writer queue.
const WRITER_QUEUE_DEPTH: usize = 64;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by frame reading.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The underlying stream failed.
    #[error("frame read failed: {0}")]
    Io(#[from] std::io::Error),
    /// The stream ended inside a frame.
    #[error("stream ended inside a frame")]
    UnexpectedEof,
    /// Headers ended without a Content-Length.
    #[error("frame headers missing Content-Length")]
    MissingLength,
    /// More than one Content-Length header was present.
    #[error("frame declared duplicate Content-Length headers")]
    DuplicateLength,
    /// The Content-Length value did not parse.
    #[error("frame Content-Length was not a valid length")]
    InvalidLength,
    /// A header line was not a valid `Name: value` pair.
    #[error("frame header line was malformed")]
    InvalidHeader,
    /// A header line exceeded the line length limit.
    #[error("frame header line exceeded {MAX_HEADER_LINE_BYTES} bytes")]
    HeaderTooLarge,
    /// The frame declared more headers than allowed.
    #[error("frame declared more than {MAX_HEADER_LINES} header lines")]
    TooManyHeaders,
    /// The declared payload exceeds the configured frame limit.
    #[error("frame payload of {declared} bytes exceeds limit {limit}")]
    TooLarge {
        /// Declared Content-Length.
        declared: usize,
        /// Configured frame size limit.
        limit: usize,
    },
}

/// Errors raised while constructing or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Backend client construction failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Catalog validation failed at startup.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Stdio transport failed.
    #[error("stdio transport failure: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// SECTION: JSON-RPC Types
// ============================================================================

/// Inbound JSON-RPC 2.0 request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// Protocol version tag; must be "2.0".
    jsonrpc: String,
    /// Request identifier; absent for notifications.
    #[serde(default)]
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Method parameters.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC error member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
}

/// Outbound JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version tag.
    pub jsonrpc: String,
    /// Correlating request identifier.
    pub id: Value,
    /// Result member, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error member, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a success response.
    #[must_use]
    fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: String::from("2.0"), id, result: Some(result), error: None }
    }

    /// Builds an error response.
    #[must_use]
    fn failure(id: Value, code: i64, message: String) -> Self {
        Self {
            jsonrpc: String::from("2.0"),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

// ============================================================================
// SECTION: Framing
// ============================================================================

/// Reads one Content-Length framed payload.
///
/// Returns `Ok(None)` on a clean end of stream before any header bytes.
/// Oversized payloads are fully discarded before the error returns, so the
/// caller can keep reading subsequent frames.
///
/// # Errors
/// Returns a [`FrameError`] on malformed headers, duplicate or missing
/// Content-Length, payloads above `max_frame_bytes`, or stream failure.
pub async fn read_framed<R>(
    reader: &mut R,
    max_frame_bytes: usize,
) -> Result<Option<Vec<u8>>, FrameError>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    let mut header_lines = 0_usize;
    loop {
        let mut line = Vec::new();
        let limit = u64::try_from(MAX_HEADER_LINE_BYTES).unwrap_or(u64::MAX);
        let mut limited = (&mut *reader).take(limit);
        let read = limited.read_until(b'\n', &mut line).await?;
        if read == 0 {
            if header_lines == 0 && content_length.is_none() {
                return Ok(None);
            }
            return Err(FrameError::UnexpectedEof);
        }
        if !line.ends_with(b"\n") {
            return Err(FrameError::HeaderTooLarge);
        }
        let text = std::str::from_utf8(&line).map_err(|_| FrameError::InvalidHeader)?;
        let trimmed = text.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        header_lines += 1;
        if header_lines > MAX_HEADER_LINES {
            return Err(FrameError::TooManyHeaders);
        }
        let Some((name, value)) = trimmed.split_once(':') else {
            return Err(FrameError::InvalidHeader);
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            if content_length.is_some() {
                return Err(FrameError::DuplicateLength);
            }
            let parsed =
                value.trim().parse::<usize>().map_err(|_| FrameError::InvalidLength)?;
            content_length = Some(parsed);
        }
    }
    let length = content_length.ok_or(FrameError::MissingLength)?;
    if length > max_frame_bytes {
        discard_exact(reader, length).await?;
        return Err(FrameError::TooLarge { declared: length, limit: max_frame_bytes });
    }
    let mut payload = vec![0_u8; length];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// Writes one Content-Length framed payload and flushes.
///
/// # Errors
/// Returns the underlying I/O error when the stream fails.
pub async fn write_framed<W>(writer: &mut W, payload: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer.write_all(header.as_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await
}

/// Discards exactly `remaining` bytes to resynchronize the stream.
async fn discard_exact<R>(reader: &mut R, mut remaining: usize) -> Result<(), FrameError>
where
    R: AsyncBufRead + Unpin,
{
    let mut scratch = [0_u8; DISCARD_CHUNK_BYTES];
    while remaining > 0 {
        let want = remaining.min(DISCARD_CHUNK_BYTES);
        let read = reader.read(&mut scratch[..want]).await?;
        if read == 0 {
            return Err(FrameError::UnexpectedEof);
        }
        remaining -= read;
    }
    Ok(())
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Stdio JSON-RPC server for the gateway tool catalog.
pub struct GatewayServer {
    /// Shared tool router.
    router: Arc<ToolRouter>,
    /// Metrics sink.
    metrics: Arc<dyn GatewayMetrics>,
    /// Inbound frame size limit in bytes.
    max_frame_bytes: usize,
    /// Drain window applied at shutdown.
    shutdown_grace: Duration,
}

impl GatewayServer {
    /// Builds a server from validated configuration.
    ///
    /// # Errors
    /// Returns a [`ServerError`] when the backend client cannot be built or
    /// the catalog fails consistency validation.
    pub fn from_config(
        config: &GatewayConfig,
        metrics: Arc<dyn GatewayMetrics>,
    ) -> Result<Self, ServerError> {
        let client = BackendClient::new(&config.backend)?;
        let router = ToolRouter::new(client)?;
        Ok(Self {
            router: Arc::new(router),
            metrics,
            max_frame_bytes: config.server.max_frame_bytes,
            shutdown_grace: Duration::from_millis(config.server.shutdown_grace_ms),
        })
    }

    /// Runs the server until stdin closes or a shutdown signal arrives, then
    /// drains in-flight calls within the grace window.
    ///
    /// # Errors
    /// Returns a [`ServerError`] when stdio fails irrecoverably.
    pub async fn run(&self) -> Result<(), ServerError> {
        let mut reader = BufReader::new(tokio::io::stdin());
        let (response_tx, mut response_rx) = mpsc::channel::<Vec<u8>>(WRITER_QUEUE_DEPTH);
        let writer = tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(frame) = response_rx.recv().await {
                if write_framed(&mut stdout, &frame).await.is_err() {
                    break;
                }
            }
        });
        let mut inflight: JoinSet<()> = JoinSet::new();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                frame = read_framed(&mut reader, self.max_frame_bytes) => {
                    match frame {
                        Ok(Some(payload)) => {
                            self.spawn_message(&mut inflight, &response_tx, payload);
                        }
                        Ok(None) => break,
                        Err(FrameError::TooLarge { declared, limit }) => {
                            let response = JsonRpcResponse::failure(
                                Value::Null,
                                PAYLOAD_TOO_LARGE,
                                format!("frame payload of {declared} bytes exceeds limit {limit}"),
                            );
                            send_response(&response_tx, &response).await;
                        }
                        Err(error) => {
                            let response = JsonRpcResponse::failure(
                                Value::Null,
                                INVALID_REQUEST,
                                error.to_string(),
                            );
                            send_response(&response_tx, &response).await;
                            break;
                        }
                    }
                }
                () = &mut shutdown => break,
            }
        }
        drop(response_tx);
        let drain = async {
            while inflight.join_next().await.is_some() {}
        };
        if tokio::time::timeout(self.shutdown_grace, drain).await.is_err() {
            inflight.abort_all();
        }
        let _ = writer.await;
        Ok(())
    }

    /// Spawns one message handler task feeding the writer channel.
    fn spawn_message(
        &self,
        inflight: &mut JoinSet<()>,
        response_tx: &mpsc::Sender<Vec<u8>>,
        payload: Vec<u8>,
    ) {
        let router = Arc::clone(&self.router);
        let metrics = Arc::clone(&self.metrics);
        let response_tx = response_tx.clone();
        inflight.spawn(async move {
            if let Some(response) = handle_message(&router, metrics.as_ref(), &payload).await {
                send_response(&response_tx, &response).await;
            }
        });
    }
}

/// Serializes and enqueues one response frame.
async fn send_response(response_tx: &mpsc::Sender<Vec<u8>>, response: &JsonRpcResponse) {
    if let Ok(bytes) = serde_json::to_vec(response) {
        let _ = response_tx.send(bytes).await;
    }
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::SignalKind;
        use tokio::signal::unix::signal;
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

// ============================================================================
// SECTION: Message Handling
// ============================================================================

/// Handles one inbound message; `None` means no response (notification).
pub(crate) async fn handle_message(
    router: &ToolRouter,
    metrics: &dyn GatewayMetrics,
    payload: &[u8],
) -> Option<JsonRpcResponse> {
    let started = Instant::now();
    let (method, tool, response) = dispatch_message(router, payload).await;
    if let Some(reply) = response.as_ref() {
        let outcome = classify_outcome(reply);
        let event = GatewayMetricEvent {
            method,
            tool,
            outcome,
            error_code: reply.error.as_ref().map(|error| error.code),
        };
        metrics.record_request(event.clone());
        metrics.record_latency(event, started.elapsed());
    }
    response
}

/// Parses and dispatches one message, classifying the method and target
/// tool for telemetry.
async fn dispatch_message(
    router: &ToolRouter,
    payload: &[u8],
) -> (GatewayMethod, Option<ToolName>, Option<JsonRpcResponse>) {
    let Ok(raw) = serde_json::from_slice::<Value>(payload) else {
        let response = JsonRpcResponse::failure(
            Value::Null,
            PARSE_ERROR,
            String::from("request was not valid JSON"),
        );
        return (GatewayMethod::Invalid, None, Some(response));
    };
    let salvage_id = raw.get("id").cloned().unwrap_or(Value::Null);
    let Ok(request) = serde_json::from_value::<JsonRpcRequest>(raw) else {
        let response = JsonRpcResponse::failure(
            salvage_id,
            INVALID_REQUEST,
            String::from("request was not a JSON-RPC 2.0 message"),
        );
        return (GatewayMethod::Invalid, None, Some(response));
    };
    if request.jsonrpc != "2.0" {
        let response = JsonRpcResponse::failure(
            request.id.unwrap_or(Value::Null),
            INVALID_REQUEST,
            String::from("jsonrpc version must be '2.0'"),
        );
        return (GatewayMethod::Invalid, None, Some(response));
    }
    let Some(id) = request.id else {
        // Notifications get no response regardless of method.
        return (GatewayMethod::Other, None, None);
    };
    match request.method.as_str() {
        "initialize" => (GatewayMethod::Initialize, None, Some(initialize_response(id))),
        "ping" => (GatewayMethod::Other, None, Some(JsonRpcResponse::success(id, json!({})))),
        "tools/list" => {
            let response = JsonRpcResponse::success(id, json!({ "tools": router.list_tools() }));
            (GatewayMethod::ToolsList, None, Some(response))
        }
        "tools/call" => {
            let tool = request
                .params
                .as_ref()
                .and_then(|params| params.get("name"))
                .and_then(Value::as_str)
                .and_then(ToolName::parse);
            let response = tool_call_response(router, id, request.params).await;
            (GatewayMethod::ToolsCall, tool, Some(response))
        }
        other => {
            let response = JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("unsupported method '{other}'"),
            );
            (GatewayMethod::Other, None, Some(response))
        }
    }
}

/// Builds the initialize handshake result.
fn initialize_response(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": "zv-gateway",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

/// Handles one `tools/call` request body.
async fn tool_call_response(
    router: &ToolRouter,
    id: Value,
    params: Option<Value>,
) -> JsonRpcResponse {
    let Some(params) = params else {
        return JsonRpcResponse::failure(
            id,
            INVALID_PARAMS,
            String::from("tools/call requires params"),
        );
    };
    let Some(name) = params.get("name").and_then(Value::as_str).map(str::to_string) else {
        return JsonRpcResponse::failure(
            id,
            INVALID_PARAMS,
            String::from("tools/call params require a string 'name'"),
        );
    };
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    match router.handle_tool_call(&name, arguments).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, INTERNAL_ERROR, error.to_string()),
        },
        Err(ToolError::UnknownTool { name }) => JsonRpcResponse::failure(
            id,
            METHOD_NOT_FOUND,
            format!("unknown tool '{name}'"),
        ),
    }
}

/// Classifies a response for telemetry labeling.
fn classify_outcome(response: &JsonRpcResponse) -> GatewayOutcome {
    if response.error.is_some() {
        return GatewayOutcome::ProtocolError;
    }
    let is_tool_error = response
        .result
        .as_ref()
        .and_then(|result| result.get("isError"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if is_tool_error { GatewayOutcome::ToolError } else { GatewayOutcome::Ok }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
