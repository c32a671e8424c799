// crates/zv-gateway-core/src/error.rs
// ============================================================================
// Module: Gateway Core Errors
// Description: Error types for catalog validation and request planning.
// Purpose: Give dispatch failures stable, secret-free diagnostic shapes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Errors produced while validating the tool catalog or planning a backend
//! request from tool arguments. Planning errors never echo full argument
//! payloads; they name the offending key only.
//! Security posture: error text may be forwarded verbatim to MCP clients and
//! must not contain credentials or request bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Dispatch Errors
// ============================================================================

/// Errors raised while planning a backend request from tool arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Tool arguments were not a JSON object.
    #[error("tool arguments must be a JSON object")]
    ArgumentsNotObject,
    /// A path placeholder had no matching argument.
    #[error("missing required argument '{field}'")]
    MissingArgument {
        /// Argument key named by the path template.
        field: String,
    },
    /// An argument value cannot be used where the rule places it.
    #[error("invalid value for argument '{field}': {reason}")]
    InvalidArgument {
        /// Offending argument key.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// Arguments were supplied to a rule that accepts none.
    #[error("unexpected argument '{field}' for this tool")]
    UnexpectedArgument {
        /// First unexpected argument key, in lexicographic order.
        field: String,
    },
}

// ============================================================================
// SECTION: Catalog Errors
// ============================================================================

/// Errors raised by catalog consistency validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two catalog entries share a tool name.
    #[error("duplicate catalog entry for tool '{tool}'")]
    DuplicateTool {
        /// Duplicated tool name.
        tool: String,
    },
    /// The catalog and routing table disagree on membership.
    #[error("catalog entry count {definitions} does not match tool count {tools}")]
    CountMismatch {
        /// Number of tool definitions emitted.
        definitions: usize,
        /// Number of tool names declared.
        tools: usize,
    },
    /// A routing rule's path template is malformed.
    #[error("malformed path template for tool '{tool}': {reason}")]
    MalformedTemplate {
        /// Tool whose rule failed validation.
        tool: String,
        /// Why the template was rejected.
        reason: String,
    },
}
