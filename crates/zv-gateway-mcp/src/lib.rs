// crates/zv-gateway-mcp/src/lib.rs
// ============================================================================
// Module: Zero Vector Gateway MCP
// Description: Stdio MCP transport, backend HTTP client, and tool routing.
// Purpose: Serve the gateway tool catalog over JSON-RPC and proxy calls.
// Dependencies: zv-gateway-core, zv-gateway-config, reqwest, tokio
// ============================================================================

//! ## Overview
//! This crate is the I/O half of the gateway. It reads Content-Length framed
//! JSON-RPC 2.0 messages from stdin, answers `initialize`, `tools/list`, and
//! `tools/call`, and forwards each planned tool call to the Zero Vector
//! backend over HTTP exactly once. Tool failures after name resolution are
//! reported in-band as `isError` tool results; only unknown tools and
//! protocol violations surface as JSON-RPC errors.
//! Security posture: stdin frames and backend responses are untrusted and
//! size-capped; the bearer token never appears in diagnostics.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::BackendClient;
pub use client::BackendError;
pub use server::GatewayServer;
pub use server::ServerError;
pub use telemetry::GatewayMetrics;
pub use telemetry::NoopMetrics;
pub use tools::ToolError;
pub use tools::ToolResult;
pub use tools::ToolRouter;
