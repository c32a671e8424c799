// crates/zv-gateway-core/src/routing.rs
// ============================================================================
// Module: Gateway Routing Table
// Description: Declarative mapping from catalog tools to backend endpoints.
// Purpose: Plan exactly one backend HTTP request per tool call, fail closed.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Every tool maps to one [`RoutingRule`]: an HTTP method, a path template
//! under `/api`, and a payload policy saying where non-path arguments go.
//! [`plan_request`] substitutes `{placeholder}` segments from the argument
//! object, removes the substituted keys, and routes the remainder to the
//! body or query string per the rule. Planning is pure; no request is sent
//! here, and each plan corresponds to exactly one backend attempt upstream.
//! Security posture: arguments are untrusted; path values are restricted to
//! a conservative identifier character set instead of being encoded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::catalog::ToolName;
use crate::error::DispatchError;

// ============================================================================
// SECTION: Routing Types
// ============================================================================

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the canonical method token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Where non-path arguments are placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// Remaining arguments become the JSON request body; empty means no body.
    Body,
    /// Remaining arguments become query-string pairs; scalars only.
    Query,
    /// The named argument is serialized verbatim as the entire request body;
    /// every other remaining argument becomes a query-string pair.
    BodyValue(&'static str),
    /// The rule accepts no arguments beyond path placeholders.
    None,
}

/// One routing rule: the complete wire recipe for a tool.
///
/// # Invariants
/// - `path_template` is rooted under `/api` and placeholders use `{key}`.
/// - Every placeholder key is a required property of the tool's input schema
///   (checked by `validate_catalog`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingRule {
    /// HTTP method for the backend call.
    pub method: HttpMethod,
    /// Path template with `{placeholder}` segments.
    pub path_template: &'static str,
    /// Placement of non-path arguments.
    pub payload: PayloadPolicy,
}

/// A fully planned backend request, ready for the HTTP client.
///
/// # Invariants
/// - `path` contains no unsubstituted placeholders.
/// - `query` pairs are in lexicographic key order.
/// - Keys consumed by path substitution appear in neither `query` nor `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Concrete request path under the backend base URL.
    pub path: String,
    /// Query-string pairs.
    pub query: Vec<(String, String)>,
    /// JSON request body, absent when no body arguments remain.
    pub body: Option<Value>,
}

// ============================================================================
// SECTION: Routing Table
// ============================================================================

/// Returns the routing rule for a tool.
///
/// This is the complete routing table. Adding a tool means adding one
/// catalog definition and one row here; there is no per-tool handler code.
#[must_use]
pub const fn routing_rule(name: ToolName) -> RoutingRule {
    match name {
        ToolName::CreateAgent => rule(HttpMethod::Post, "/api/agents/create", PayloadPolicy::Body),
        ToolName::GetAgent => rule(HttpMethod::Get, "/api/agents/{agent_id}", PayloadPolicy::None),
        ToolName::UpdateAgent => {
            rule(HttpMethod::Patch, "/api/agents/{agent_id}", PayloadPolicy::Body)
        }
        ToolName::ListAgents => rule(HttpMethod::Get, "/api/agents", PayloadPolicy::Query),
        ToolName::AssignTask => {
            rule(HttpMethod::Post, "/api/agents/{agent_id}/assign-task", PayloadPolicy::Body)
        }
        ToolName::RecruitSubordinate => {
            rule(HttpMethod::Post, "/api/agents/recruit-subordinate", PayloadPolicy::Body)
        }
        ToolName::GetSubordinates => {
            rule(HttpMethod::Get, "/api/agents/{agent_id}/subordinates", PayloadPolicy::None)
        }
        ToolName::GetAgentHierarchy => {
            rule(HttpMethod::Get, "/api/agents/{agent_id}/hierarchy", PayloadPolicy::None)
        }
        ToolName::RecordInteraction => {
            rule(HttpMethod::Post, "/api/agents/interaction", PayloadPolicy::Body)
        }
        ToolName::GetAgentPerformance => {
            rule(HttpMethod::Get, "/api/agents/{agent_id}/performance", PayloadPolicy::Query)
        }
        ToolName::UpdateRelationship => {
            rule(HttpMethod::Post, "/api/agents/relationship", PayloadPolicy::Body)
        }
        ToolName::GetAgentRelationships => {
            rule(HttpMethod::Get, "/api/agents/{agent_id}/relationships", PayloadPolicy::None)
        }
        ToolName::ActivateAgent => {
            rule(HttpMethod::Post, "/api/agents/{agent_id}/activate", PayloadPolicy::None)
        }
        ToolName::DeactivateAgent => {
            rule(HttpMethod::Delete, "/api/agents/{agent_id}", PayloadPolicy::None)
        }
        ToolName::InitializeConsciousness => {
            rule(HttpMethod::Post, "/api/consciousness/initialize", PayloadPolicy::Body)
        }
        ToolName::UpdateConsciousnessState => {
            rule(HttpMethod::Patch, "/api/consciousness/{agent_id}/state", PayloadPolicy::Body)
        }
        ToolName::ProcessExperience => {
            rule(HttpMethod::Post, "/api/consciousness/experience", PayloadPolicy::Body)
        }
        ToolName::InitiateSleepCycle => {
            rule(HttpMethod::Post, "/api/consciousness/{agent_id}/sleep", PayloadPolicy::Body)
        }
        ToolName::GetConsciousnessStatus => {
            rule(HttpMethod::Get, "/api/consciousness/{agent_id}/status", PayloadPolicy::None)
        }
        ToolName::EvolvePersonality => {
            rule(HttpMethod::Post, "/api/consciousness/personality/evolve", PayloadPolicy::Body)
        }
        ToolName::GetConsciousnessMetrics => rule(
            HttpMethod::Get,
            "/api/consciousness/{agent_id}/metrics/history",
            PayloadPolicy::None,
        ),
        ToolName::TriggerIntrospection => rule(
            HttpMethod::Post,
            "/api/consciousness/{agent_id}/introspection",
            PayloadPolicy::None,
        ),
        ToolName::CreateMemory => rule(HttpMethod::Post, "/api/memory/create", PayloadPolicy::Body),
        ToolName::CreateEpisodicMemory => {
            rule(HttpMethod::Post, "/api/memory/episodic", PayloadPolicy::Body)
        }
        ToolName::CreateSemanticMemory => {
            rule(HttpMethod::Post, "/api/memory/semantic", PayloadPolicy::Body)
        }
        ToolName::CreateProceduralMemory => {
            rule(HttpMethod::Post, "/api/memory/procedural", PayloadPolicy::Body)
        }
        ToolName::RetrieveMemories => {
            rule(HttpMethod::Post, "/api/memory/retrieve", PayloadPolicy::Body)
        }
        ToolName::ListMemories => {
            rule(HttpMethod::Get, "/api/memory/{agent_id}/memories", PayloadPolicy::Query)
        }
        ToolName::GetWorkingMemory => {
            rule(HttpMethod::Get, "/api/memory/{agent_id}/working-memory", PayloadPolicy::None)
        }
        ToolName::ConsolidateMemories => {
            // The owning agent travels in the body, not the path.
            rule(HttpMethod::Post, "/api/memory/consolidate", PayloadPolicy::Body)
        }
        ToolName::UpdateMemoryImportance => {
            rule(HttpMethod::Patch, "/api/memory/importance", PayloadPolicy::Body)
        }
        ToolName::AssociateMemories => {
            rule(HttpMethod::Post, "/api/memory/associate", PayloadPolicy::Body)
        }
        ToolName::GetMemoryStatistics => {
            rule(HttpMethod::Get, "/api/memory/{agent_id}/statistics", PayloadPolicy::None)
        }
        ToolName::DeleteMemory => {
            rule(HttpMethod::Delete, "/api/memory/{memory_id}", PayloadPolicy::None)
        }
        ToolName::CreateWorkflow => {
            rule(HttpMethod::Post, "/api/orchestration/workflow/create", PayloadPolicy::Body)
        }
        ToolName::ExecuteWorkflow => rule(
            HttpMethod::Post,
            "/api/orchestration/workflow/{workflow_id}/execute",
            PayloadPolicy::Body,
        ),
        ToolName::DelegateTask => {
            rule(HttpMethod::Post, "/api/orchestration/task/delegate", PayloadPolicy::Body)
        }
        ToolName::DecomposeTask => {
            // The backend binds task_id from the query string on this POST.
            rule(HttpMethod::Post, "/api/orchestration/task/decompose", PayloadPolicy::Query)
        }
        ToolName::CreateSubtask => {
            rule(HttpMethod::Post, "/api/orchestration/subtask/create", PayloadPolicy::Body)
        }
        ToolName::AssignAgents => {
            rule(HttpMethod::Post, "/api/orchestration/agents/assign", PayloadPolicy::Body)
        }
        ToolName::UpdateTaskProgress => rule(
            HttpMethod::Patch,
            "/api/orchestration/task/{task_id}/progress",
            PayloadPolicy::Body,
        ),
        ToolName::GetWorkflowStatus => rule(
            HttpMethod::Get,
            "/api/orchestration/workflow/{workflow_id}/status",
            PayloadPolicy::None,
        ),
        ToolName::GetTaskHierarchy => rule(
            HttpMethod::Get,
            "/api/orchestration/task/{task_id}/hierarchy",
            PayloadPolicy::None,
        ),
        ToolName::OptimizeWorkflow => rule(
            HttpMethod::Post,
            "/api/orchestration/workflow/{workflow_id}/optimize",
            PayloadPolicy::Body,
        ),
        ToolName::GetOrchestrationAnalytics => rule(
            HttpMethod::Get,
            "/api/orchestration/analytics/performance",
            PayloadPolicy::Query,
        ),
        ToolName::GetAgentWorkload => {
            rule(HttpMethod::Get, "/api/orchestration/agents/workload", PayloadPolicy::Query)
        }
        ToolName::SynchronizeCoordination => rule(
            // The body is the bare agent_ids array; the strategy rides the query.
            HttpMethod::Post,
            "/api/orchestration/coordination/sync",
            PayloadPolicy::BodyValue("agent_ids"),
        ),
        ToolName::CancelWorkflow => rule(
            HttpMethod::Delete,
            "/api/orchestration/workflow/{workflow_id}",
            PayloadPolicy::Query,
        ),
    }
}

/// Shorthand for building a routing rule row.
const fn rule(
    method: HttpMethod,
    path_template: &'static str,
    payload: PayloadPolicy,
) -> RoutingRule {
    RoutingRule { method, path_template, payload }
}

// ============================================================================
// SECTION: Request Planning
// ============================================================================

/// Plans the single backend request for a tool call.
///
/// `arguments` is the raw MCP `arguments` value; `null` is treated as an
/// empty object. Path placeholders consume their keys, so a substituted
/// argument never also appears in the body or query.
///
/// # Errors
/// Returns a [`DispatchError`] when arguments are not an object, a
/// placeholder key is missing or unusable in a path, a query value is not a
/// scalar, a [`PayloadPolicy::BodyValue`] field is absent, or leftover
/// arguments hit a [`PayloadPolicy::None`] rule.
pub fn plan_request(name: ToolName, arguments: Value) -> Result<BackendRequest, DispatchError> {
    let rule = routing_rule(name);
    let mut args = match arguments {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => return Err(DispatchError::ArgumentsNotObject),
    };
    let path = substitute_path(rule.path_template, &mut args)?;
    let (query, body) = match rule.payload {
        PayloadPolicy::Body => {
            let body = if args.is_empty() { None } else { Some(Value::Object(args)) };
            (Vec::new(), body)
        }
        PayloadPolicy::Query => (render_query(args)?, None),
        PayloadPolicy::BodyValue(field) => {
            let body = args
                .remove(field)
                .ok_or_else(|| DispatchError::MissingArgument { field: field.to_string() })?;
            (render_query(args)?, Some(body))
        }
        PayloadPolicy::None => {
            if let Some(field) = first_key(&args) {
                return Err(DispatchError::UnexpectedArgument { field });
            }
            (Vec::new(), None)
        }
    };
    Ok(BackendRequest { method: rule.method, path, query, body })
}

/// Substitutes `{placeholder}` segments, removing consumed keys from `args`.
fn substitute_path(template: &str, args: &mut Map<String, Value>) -> Result<String, DispatchError> {
    let mut segments = Vec::new();
    for segment in template.split('/') {
        if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
            let key = &segment[1..segment.len() - 1];
            let value = args
                .remove(key)
                .ok_or_else(|| DispatchError::MissingArgument { field: key.to_string() })?;
            segments.push(render_path_value(key, &value)?);
        } else {
            segments.push(segment.to_string());
        }
    }
    Ok(segments.join("/"))
}

/// Renders one argument value as a path segment.
fn render_path_value(field: &str, value: &Value) -> Result<String, DispatchError> {
    let rendered = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => {
            return Err(DispatchError::InvalidArgument {
                field: field.to_string(),
                reason: String::from("path values must be strings or numbers"),
            });
        }
    };
    if rendered.is_empty() {
        return Err(DispatchError::InvalidArgument {
            field: field.to_string(),
            reason: String::from("path values must not be empty"),
        });
    }
    if !rendered.chars().all(is_path_safe) {
        return Err(DispatchError::InvalidArgument {
            field: field.to_string(),
            reason: String::from("path values are limited to [A-Za-z0-9._:-]"),
        });
    }
    Ok(rendered)
}

/// Character allowlist for path segment values.
const fn is_path_safe(character: char) -> bool {
    character.is_ascii_alphanumeric()
        || matches!(character, '-' | '_' | '.' | ':')
}

/// Renders remaining arguments as query pairs in lexicographic key order.
///
/// `null` values are skipped so optional filters can be passed explicitly
/// unset. Arrays and objects have no canonical query encoding and are
/// rejected.
fn render_query(args: Map<String, Value>) -> Result<Vec<(String, String)>, DispatchError> {
    let entries: BTreeMap<String, Value> = args.into_iter().collect();
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let rendered = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(DispatchError::InvalidArgument {
                    field: key,
                    reason: String::from("query values must be scalars"),
                });
            }
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}

/// Returns the lexicographically first key of `args`, if any.
fn first_key(args: &Map<String, Value>) -> Option<String> {
    args.keys().min().cloned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
