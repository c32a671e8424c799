// crates/zv-gateway-mcp/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Observability hooks for the stdio transport and tool routing.
// Purpose: Provide metric events and latency hooks without hard deps.
// Dependencies: zv-gateway-core
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for gateway request counters
//! and latency histograms. It is intentionally dependency-light so
//! deployments can plug in Prometheus or OpenTelemetry without redesign.
//! Security posture: telemetry must avoid leaking tool arguments, backend
//! payloads, or credentials; labels come from closed enums only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use zv_gateway_core::ToolName;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// JSON-RPC method classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GatewayMethod {
    /// JSON-RPC initialize handshake.
    Initialize,
    /// JSON-RPC tools/list.
    ToolsList,
    /// JSON-RPC tools/call.
    ToolsCall,
    /// Invalid or malformed JSON-RPC request.
    Invalid,
    /// Unsupported JSON-RPC method.
    Other,
}

impl GatewayMethod {
    /// Returns a stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }
}

/// Gateway request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GatewayOutcome {
    /// Successful request.
    Ok,
    /// Tool result reported in-band with `isError`.
    ToolError,
    /// JSON-RPC protocol error.
    ProtocolError,
}

impl GatewayOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ToolError => "tool_error",
            Self::ProtocolError => "protocol_error",
        }
    }
}

/// Gateway request metric event payload.
///
/// # Invariants
/// - `tool` is populated for `tools/call` requests naming a catalog tool
///   and `None` everywhere else.
#[derive(Debug, Clone)]
pub struct GatewayMetricEvent {
    /// JSON-RPC method classification.
    pub method: GatewayMethod,
    /// Catalog tool targeted by a `tools/call` request.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: GatewayOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for gateway requests and latencies.
pub trait GatewayMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: GatewayMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: GatewayMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl GatewayMetrics for NoopMetrics {
    fn record_request(&self, _event: GatewayMetricEvent) {}

    fn record_latency(&self, _event: GatewayMetricEvent, _latency: Duration) {}
}
