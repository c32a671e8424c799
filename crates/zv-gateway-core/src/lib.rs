// crates/zv-gateway-core/src/lib.rs
// ============================================================================
// Module: Zero Vector Gateway Core
// Description: Tool catalog, routing table, and request planning for the gateway.
// Purpose: Pure translation from MCP tool calls to backend HTTP request plans.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate defines the fixed catalog of tools the gateway exposes over MCP
//! and the declarative routing table that maps each tool to a Zero Vector
//! backend HTTP endpoint. Everything here is pure data and pure functions; no
//! I/O happens in this crate. The transport and HTTP layers live in
//! `zv-gateway-mcp`.
//! Security posture: tool arguments are untrusted client input; planning is
//! fail-closed and rejects arguments that do not fit the routing rule.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod routing;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use catalog::ToolDefinition;
pub use catalog::ToolGroup;
pub use catalog::ToolName;
pub use catalog::tool_definitions;
pub use catalog::validate_catalog;
pub use error::CatalogError;
pub use error::DispatchError;
pub use routing::BackendRequest;
pub use routing::HttpMethod;
pub use routing::PayloadPolicy;
pub use routing::RoutingRule;
pub use routing::plan_request;
pub use routing::routing_rule;
