// crates/zv-gateway-mcp/src/tools.rs
// ============================================================================
// Module: Gateway Tool Router
// Description: Tool listing, dispatch, and error translation for MCP.
// Purpose: Keep unknown-tool and tool-failure errors on separate channels.
// Dependencies: zv-gateway-core, client
// ============================================================================

//! ## Overview
//! [`ToolRouter`] answers `tools/list` from the static catalog and drives
//! `tools/call` through plan-then-execute. Error translation follows one
//! rule: an unknown tool name is a protocol-level failure and surfaces as
//! [`ToolError::UnknownTool`]; everything after name resolution, including
//! bad arguments and backend failures, is reported in-band as a
//! [`ToolResult`] with `isError: true` so the client sees a normal JSON-RPC
//! result. The backend is never contacted for an unknown tool.
//! Security posture: diagnostics name the tool, method, and path but never
//! echo argument payloads or credentials.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use zv_gateway_core::CatalogError;
use zv_gateway_core::ToolDefinition;
use zv_gateway_core::ToolName;
use zv_gateway_core::plan_request;
use zv_gateway_core::routing_rule;
use zv_gateway_core::tool_definitions;
use zv_gateway_core::validate_catalog;

use crate::client::BackendClient;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hard dispatch errors that surface as JSON-RPC errors.
///
/// # Invariants
/// - Unknown tool is the only hard error; every failure after name
///   resolution is folded into an `isError` tool result instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("unknown tool '{name}'")]
    UnknownTool {
        /// Requested tool name.
        name: String,
    },
}

// ============================================================================
// SECTION: Tool Results
// ============================================================================

/// One content block inside a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    /// Content type tag; the gateway only emits `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Text payload.
    pub text: String,
}

/// MCP tool result envelope.
///
/// # Invariants
/// - `is_error` is `true` exactly when the call did not produce a
///   successful backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Result content blocks.
    pub content: Vec<ToolContent>,
    /// Whether this result reports a tool-level failure.
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Wraps a successful backend response.
    #[must_use]
    pub fn success(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self { content: vec![text_content(text)], is_error: false }
    }

    /// Wraps a tool-level failure diagnostic.
    #[must_use]
    pub fn failure(diagnostic: String) -> Self {
        Self { content: vec![text_content(diagnostic)], is_error: true }
    }
}

/// Builds a text content block.
fn text_content(text: String) -> ToolContent {
    ToolContent { kind: String::from("text"), text }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Routes `tools/list` and `tools/call` requests.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    /// Backend HTTP client shared across calls.
    client: BackendClient,
}

impl ToolRouter {
    /// Builds a router after checking catalog and routing-table consistency.
    ///
    /// # Errors
    /// Returns a [`CatalogError`] when the catalog fails validation; the
    /// server refuses to start with an inconsistent table.
    pub fn new(client: BackendClient) -> Result<Self, CatalogError> {
        validate_catalog()?;
        Ok(Self { client })
    }

    /// Returns the full tool catalog in stable order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Handles one `tools/call` request.
    ///
    /// # Errors
    /// Returns [`ToolError::UnknownTool`] for names outside the catalog.
    /// All other failures are reported inside the returned [`ToolResult`].
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolResult, ToolError> {
        let Some(tool) = ToolName::parse(name) else {
            return Err(ToolError::UnknownTool { name: name.to_string() });
        };
        let plan = match plan_request(tool, arguments) {
            Ok(plan) => plan,
            Err(error) => {
                return Ok(ToolResult::failure(format!("tool '{tool}' rejected: {error}")));
            }
        };
        let rule = routing_rule(tool);
        match self.client.execute(&plan).await {
            Ok(value) => Ok(ToolResult::success(&value)),
            Err(error) => Ok(ToolResult::failure(format!(
                "tool '{tool}' failed ({} {}): {error}",
                rule.method.as_str(),
                plan.path,
            ))),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
