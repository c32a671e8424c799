// crates/zv-gateway-core/src/catalog.rs
// ============================================================================
// Module: Gateway Tool Catalog
// Description: Fixed catalog of MCP tools exposed by the Zero Vector gateway.
// Purpose: Provide stable tool names, descriptions, and input schemas.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The catalog is the single source of truth for which tools exist. Each tool
//! has exactly one [`ToolDefinition`] here and exactly one routing rule in
//! [`crate::routing`]; `validate_catalog` checks that the two stay consistent,
//! including that every path placeholder is a required schema property.
//! Catalog order is stable: `tools/list` always returns tools in
//! [`ToolName::ALL`] order.
//! Security posture: schemas describe expected input but the gateway does not
//! validate tool arguments against them; the backend owns semantic validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::error::CatalogError;
use crate::routing::PayloadPolicy;
use crate::routing::routing_rule;

// ============================================================================
// SECTION: Tool Groups
// ============================================================================

/// Logical grouping of catalog tools, mirroring the backend API routers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolGroup {
    /// Agent lifecycle and hierarchy management.
    Agents,
    /// Consciousness state and personality development.
    Consciousness,
    /// Memory storage and retrieval.
    Memory,
    /// Workflow and task orchestration.
    Orchestration,
}

impl ToolGroup {
    /// Returns the stable string label for this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Consciousness => "consciousness",
            Self::Memory => "memory",
            Self::Orchestration => "orchestration",
        }
    }
}

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Stable identifiers for every tool the gateway exposes.
///
/// # Invariants
/// - Wire form is `snake_case` and matches [`ToolName::as_str`].
/// - [`ToolName::ALL`] lists every variant exactly once, in catalog order.
/// - Each variant has exactly one routing rule and one catalog definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Create a new agent.
    CreateAgent,
    /// Fetch a single agent by identifier.
    GetAgent,
    /// Update mutable fields on an agent.
    UpdateAgent,
    /// List agents with optional filters.
    ListAgents,
    /// Assign a task to an agent.
    AssignTask,
    /// Have a manager recruit a subordinate agent.
    RecruitSubordinate,
    /// List an agent's direct subordinates.
    GetSubordinates,
    /// Fetch the reporting hierarchy rooted at an agent.
    GetAgentHierarchy,
    /// Record an interaction between two agents.
    RecordInteraction,
    /// Fetch performance metrics for an agent.
    GetAgentPerformance,
    /// Adjust the relationship between two agents.
    UpdateRelationship,
    /// List an agent's relationships.
    GetAgentRelationships,
    /// Reactivate a deactivated agent.
    ActivateAgent,
    /// Deactivate an agent.
    DeactivateAgent,
    /// Initialize a consciousness state for an agent.
    InitializeConsciousness,
    /// Update an agent's consciousness state.
    UpdateConsciousnessState,
    /// Feed an experience into an agent's consciousness.
    ProcessExperience,
    /// Start a sleep/consolidation cycle for an agent.
    InitiateSleepCycle,
    /// Fetch an agent's current consciousness status.
    GetConsciousnessStatus,
    /// Apply evolutionary pressure to an agent's personality.
    EvolvePersonality,
    /// Fetch historical consciousness metrics for an agent.
    GetConsciousnessMetrics,
    /// Trigger an introspection pass for an agent.
    TriggerIntrospection,
    /// Store a memory of unspecified type.
    CreateMemory,
    /// Store an episodic memory.
    CreateEpisodicMemory,
    /// Store a semantic memory.
    CreateSemanticMemory,
    /// Store a procedural memory.
    CreateProceduralMemory,
    /// Retrieve memories by relevance query.
    RetrieveMemories,
    /// List an agent's stored memories.
    ListMemories,
    /// Fetch an agent's working memory.
    GetWorkingMemory,
    /// Consolidate an agent's memories.
    ConsolidateMemories,
    /// Update the importance score of a memory.
    UpdateMemoryImportance,
    /// Associate two memories.
    AssociateMemories,
    /// Fetch memory statistics for an agent.
    GetMemoryStatistics,
    /// Delete a memory.
    DeleteMemory,
    /// Create a workflow from a task list.
    CreateWorkflow,
    /// Execute a workflow.
    ExecuteWorkflow,
    /// Delegate a task to the best-suited agent.
    DelegateTask,
    /// Decompose a task into subtasks.
    DecomposeTask,
    /// Create a subtask under a parent task.
    CreateSubtask,
    /// Assign agents to a task.
    AssignAgents,
    /// Update progress on a task.
    UpdateTaskProgress,
    /// Fetch the status of a workflow.
    GetWorkflowStatus,
    /// Fetch the hierarchy of a task and its subtasks.
    GetTaskHierarchy,
    /// Optimize a workflow's execution plan.
    OptimizeWorkflow,
    /// Fetch orchestration performance analytics.
    GetOrchestrationAnalytics,
    /// Fetch current workload per agent.
    GetAgentWorkload,
    /// Synchronize coordination state across agents.
    SynchronizeCoordination,
    /// Cancel a running workflow.
    CancelWorkflow,
}

impl ToolName {
    /// Every tool in catalog order.
    pub const ALL: &'static [Self] = &[
        Self::CreateAgent,
        Self::GetAgent,
        Self::UpdateAgent,
        Self::ListAgents,
        Self::AssignTask,
        Self::RecruitSubordinate,
        Self::GetSubordinates,
        Self::GetAgentHierarchy,
        Self::RecordInteraction,
        Self::GetAgentPerformance,
        Self::UpdateRelationship,
        Self::GetAgentRelationships,
        Self::ActivateAgent,
        Self::DeactivateAgent,
        Self::InitializeConsciousness,
        Self::UpdateConsciousnessState,
        Self::ProcessExperience,
        Self::InitiateSleepCycle,
        Self::GetConsciousnessStatus,
        Self::EvolvePersonality,
        Self::GetConsciousnessMetrics,
        Self::TriggerIntrospection,
        Self::CreateMemory,
        Self::CreateEpisodicMemory,
        Self::CreateSemanticMemory,
        Self::CreateProceduralMemory,
        Self::RetrieveMemories,
        Self::ListMemories,
        Self::GetWorkingMemory,
        Self::ConsolidateMemories,
        Self::UpdateMemoryImportance,
        Self::AssociateMemories,
        Self::GetMemoryStatistics,
        Self::DeleteMemory,
        Self::CreateWorkflow,
        Self::ExecuteWorkflow,
        Self::DelegateTask,
        Self::DecomposeTask,
        Self::CreateSubtask,
        Self::AssignAgents,
        Self::UpdateTaskProgress,
        Self::GetWorkflowStatus,
        Self::GetTaskHierarchy,
        Self::OptimizeWorkflow,
        Self::GetOrchestrationAnalytics,
        Self::GetAgentWorkload,
        Self::SynchronizeCoordination,
        Self::CancelWorkflow,
    ];

    /// Returns the stable wire name for this tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateAgent => "create_agent",
            Self::GetAgent => "get_agent",
            Self::UpdateAgent => "update_agent",
            Self::ListAgents => "list_agents",
            Self::AssignTask => "assign_task",
            Self::RecruitSubordinate => "recruit_subordinate",
            Self::GetSubordinates => "get_subordinates",
            Self::GetAgentHierarchy => "get_agent_hierarchy",
            Self::RecordInteraction => "record_interaction",
            Self::GetAgentPerformance => "get_agent_performance",
            Self::UpdateRelationship => "update_relationship",
            Self::GetAgentRelationships => "get_agent_relationships",
            Self::ActivateAgent => "activate_agent",
            Self::DeactivateAgent => "deactivate_agent",
            Self::InitializeConsciousness => "initialize_consciousness",
            Self::UpdateConsciousnessState => "update_consciousness_state",
            Self::ProcessExperience => "process_experience",
            Self::InitiateSleepCycle => "initiate_sleep_cycle",
            Self::GetConsciousnessStatus => "get_consciousness_status",
            Self::EvolvePersonality => "evolve_personality",
            Self::GetConsciousnessMetrics => "get_consciousness_metrics",
            Self::TriggerIntrospection => "trigger_introspection",
            Self::CreateMemory => "create_memory",
            Self::CreateEpisodicMemory => "create_episodic_memory",
            Self::CreateSemanticMemory => "create_semantic_memory",
            Self::CreateProceduralMemory => "create_procedural_memory",
            Self::RetrieveMemories => "retrieve_memories",
            Self::ListMemories => "list_memories",
            Self::GetWorkingMemory => "get_working_memory",
            Self::ConsolidateMemories => "consolidate_memories",
            Self::UpdateMemoryImportance => "update_memory_importance",
            Self::AssociateMemories => "associate_memories",
            Self::GetMemoryStatistics => "get_memory_statistics",
            Self::DeleteMemory => "delete_memory",
            Self::CreateWorkflow => "create_workflow",
            Self::ExecuteWorkflow => "execute_workflow",
            Self::DelegateTask => "delegate_task",
            Self::DecomposeTask => "decompose_task",
            Self::CreateSubtask => "create_subtask",
            Self::AssignAgents => "assign_agents",
            Self::UpdateTaskProgress => "update_task_progress",
            Self::GetWorkflowStatus => "get_workflow_status",
            Self::GetTaskHierarchy => "get_task_hierarchy",
            Self::OptimizeWorkflow => "optimize_workflow",
            Self::GetOrchestrationAnalytics => "get_orchestration_analytics",
            Self::GetAgentWorkload => "get_agent_workload",
            Self::SynchronizeCoordination => "synchronize_coordination",
            Self::CancelWorkflow => "cancel_workflow",
        }
    }

    /// Parses a wire name into a tool, returning `None` for unknown names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tool| tool.as_str() == value)
    }

    /// Returns the logical group this tool belongs to.
    #[must_use]
    pub const fn group(self) -> ToolGroup {
        match self {
            Self::CreateAgent
            | Self::GetAgent
            | Self::UpdateAgent
            | Self::ListAgents
            | Self::AssignTask
            | Self::RecruitSubordinate
            | Self::GetSubordinates
            | Self::GetAgentHierarchy
            | Self::RecordInteraction
            | Self::GetAgentPerformance
            | Self::UpdateRelationship
            | Self::GetAgentRelationships
            | Self::ActivateAgent
            | Self::DeactivateAgent => ToolGroup::Agents,
            Self::InitializeConsciousness
            | Self::UpdateConsciousnessState
            | Self::ProcessExperience
            | Self::InitiateSleepCycle
            | Self::GetConsciousnessStatus
            | Self::EvolvePersonality
            | Self::GetConsciousnessMetrics
            | Self::TriggerIntrospection => ToolGroup::Consciousness,
            Self::CreateMemory
            | Self::CreateEpisodicMemory
            | Self::CreateSemanticMemory
            | Self::CreateProceduralMemory
            | Self::RetrieveMemories
            | Self::ListMemories
            | Self::GetWorkingMemory
            | Self::ConsolidateMemories
            | Self::UpdateMemoryImportance
            | Self::AssociateMemories
            | Self::GetMemoryStatistics
            | Self::DeleteMemory => ToolGroup::Memory,
            Self::CreateWorkflow
            | Self::ExecuteWorkflow
            | Self::DelegateTask
            | Self::DecomposeTask
            | Self::CreateSubtask
            | Self::AssignAgents
            | Self::UpdateTaskProgress
            | Self::GetWorkflowStatus
            | Self::GetTaskHierarchy
            | Self::OptimizeWorkflow
            | Self::GetOrchestrationAnalytics
            | Self::GetAgentWorkload
            | Self::SynchronizeCoordination
            | Self::CancelWorkflow => ToolGroup::Orchestration,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition used by MCP tool listing.
///
/// # Invariants
/// - `name` is a stable MCP tool identifier.
/// - `input_schema` is a JSON Schema payload for the tool input shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Returns the full tool catalog in stable order.
///
/// The result is deterministic and involves no I/O, so `tools/list` is
/// idempotent by construction.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().copied().map(definition_for).collect()
}

/// Returns the catalog definition for a single tool.
#[must_use]
pub fn definition_for(name: ToolName) -> ToolDefinition {
    match name {
        ToolName::CreateAgent => definition(
            name,
            "Create a new agent with a name, type, and optional specialization.",
            &json!({
                "name": schema_for_string("Human-readable agent name."),
                "agent_type": schema_for_string("Agent type, e.g. 'worker' or 'manager'."),
                "specialization": schema_for_string("Optional domain specialization."),
                "personality_traits": schema_for_object("Initial personality trait map."),
                "manager_id": schema_identifier("Identifier of the managing agent."),
                "capabilities": schema_for_string_array("Capability labels granted at creation."),
                "config": schema_for_object("Agent-specific configuration overrides.")
            }),
            &["name", "agent_type"],
        ),
        ToolName::GetAgent => definition(
            name,
            "Fetch a single agent by identifier.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::UpdateAgent => definition(
            name,
            "Update mutable fields on an existing agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "name": schema_for_string("Replacement agent name."),
                "specialization": schema_for_string("Replacement specialization."),
                "status": schema_for_string("Replacement lifecycle status."),
                "config": schema_for_object("Configuration overrides to merge.")
            }),
            &["agent_id"],
        ),
        ToolName::ListAgents => definition(
            name,
            "List agents, optionally filtered by type, status, specialization, or manager.",
            &json!({
                "agent_type": schema_for_string("Filter by agent type."),
                "status": schema_for_string("Filter by lifecycle status."),
                "specialization": schema_for_string("Filter by specialization."),
                "manager_id": schema_identifier("Filter by managing agent."),
                "limit": schema_for_count("Maximum number of agents to return."),
                "offset": schema_for_offset("Number of agents to skip.")
            }),
            &[],
        ),
        ToolName::AssignTask => definition(
            name,
            "Assign a task directly to an agent.",
            &json!({
                "agent_id": schema_identifier("Agent receiving the task."),
                "task_description": schema_for_string("What the agent should do."),
                "priority": schema_for_string("Task priority label."),
                "deadline": schema_for_string("Optional ISO 8601 deadline."),
                "context": schema_for_object("Additional task context.")
            }),
            &["agent_id", "task_description"],
        ),
        ToolName::RecruitSubordinate => definition(
            name,
            "Have a manager agent recruit a new subordinate for a role.",
            &json!({
                "manager_id": schema_identifier("Recruiting manager agent."),
                "role": schema_for_string("Role the subordinate will fill."),
                "specialization": schema_for_string("Desired specialization."),
                "agent_type": schema_for_string("Agent type for the recruit.")
            }),
            &["manager_id", "role"],
        ),
        ToolName::GetSubordinates => definition(
            name,
            "List the direct subordinates of an agent.",
            &json!({
                "agent_id": schema_identifier("Manager agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::GetAgentHierarchy => definition(
            name,
            "Fetch the reporting hierarchy rooted at an agent.",
            &json!({
                "agent_id": schema_identifier("Root agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::RecordInteraction => definition(
            name,
            "Record an interaction between two agents.",
            &json!({
                "source_agent_id": schema_identifier("Initiating agent."),
                "target_agent_id": schema_identifier("Receiving agent."),
                "interaction_type": schema_for_string("Interaction kind, e.g. 'collaboration'."),
                "content": schema_for_string("Interaction content or summary."),
                "outcome": schema_for_string("Recorded outcome label.")
            }),
            &["source_agent_id", "target_agent_id", "interaction_type"],
        ),
        ToolName::GetAgentPerformance => definition(
            name,
            "Fetch performance metrics for an agent over a trailing window.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "days": schema_for_count("Trailing window in days (backend default 7).")
            }),
            &["agent_id"],
        ),
        ToolName::UpdateRelationship => definition(
            name,
            "Adjust the relationship between two agents.",
            &json!({
                "source_agent_id": schema_identifier("First agent."),
                "target_agent_id": schema_identifier("Second agent."),
                "trust_delta": schema_for_number("Signed trust adjustment."),
                "notes": schema_for_string("Free-form relationship notes.")
            }),
            &["source_agent_id", "target_agent_id"],
        ),
        ToolName::GetAgentRelationships => definition(
            name,
            "List the recorded relationships of an agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::ActivateAgent => definition(
            name,
            "Reactivate a previously deactivated agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::DeactivateAgent => definition(
            name,
            "Deactivate an agent (soft delete).",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::InitializeConsciousness => definition(
            name,
            "Initialize a consciousness state for an agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "personality_traits": schema_for_object("Seed personality trait map."),
                "initial_state": schema_for_object("Initial consciousness state overrides.")
            }),
            &["agent_id"],
        ),
        ToolName::UpdateConsciousnessState => definition(
            name,
            "Update an agent's consciousness state dimensions.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "emotional_state": schema_for_string("Dominant emotional state label."),
                "arousal": schema_for_number("Arousal level in [0, 1]."),
                "valence": schema_for_number("Valence in [-1, 1]."),
                "focus": schema_for_string("Current focus of attention.")
            }),
            &["agent_id"],
        ),
        ToolName::ProcessExperience => definition(
            name,
            "Feed an experience into an agent's consciousness for processing.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "experience": schema_for_object("Experience payload to process."),
                "significance": schema_for_number("Subjective significance in [0, 1].")
            }),
            &["agent_id", "experience"],
        ),
        ToolName::InitiateSleepCycle => definition(
            name,
            "Start a sleep and consolidation cycle for an agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "duration_minutes": schema_for_count("Requested cycle duration in minutes.")
            }),
            &["agent_id"],
        ),
        ToolName::GetConsciousnessStatus => definition(
            name,
            "Fetch an agent's current consciousness status.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::EvolvePersonality => definition(
            name,
            "Apply evolutionary pressure to an agent's personality.",
            &json!({
                "agent_id": schema_identifier("Agent identifier."),
                "pressure": schema_for_object("Trait-level pressure map."),
                "learning_rate": schema_for_number("Evolution learning rate in (0, 1].")
            }),
            &["agent_id"],
        ),
        ToolName::GetConsciousnessMetrics => definition(
            name,
            "Fetch historical consciousness metrics for an agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::TriggerIntrospection => definition(
            name,
            "Trigger an introspection cycle for an agent.",
            &json!({
                "agent_id": schema_identifier("Agent identifier.")
            }),
            &["agent_id"],
        ),
        ToolName::CreateMemory => definition(
            name,
            "Store a memory for an agent, typed by the backend default when omitted.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "content": schema_for_string("Memory content."),
                "memory_type": schema_for_string("Memory type: episodic, semantic, or procedural."),
                "importance": schema_for_number("Importance score in [0, 1]."),
                "metadata": schema_for_object("Free-form memory metadata.")
            }),
            &["agent_id", "content"],
        ),
        ToolName::CreateEpisodicMemory => definition(
            name,
            "Store an episodic memory with emotional context.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "content": schema_for_string("Episode content."),
                "context": schema_for_object("Situational context for the episode."),
                "emotional_valence": schema_for_number("Valence in [-1, 1]."),
                "importance": schema_for_number("Importance score in [0, 1].")
            }),
            &["agent_id", "content"],
        ),
        ToolName::CreateSemanticMemory => definition(
            name,
            "Store a semantic memory with concept links.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "content": schema_for_string("Fact or concept content."),
                "concepts": schema_for_string_array("Linked concept labels."),
                "confidence": schema_for_number("Confidence in [0, 1].")
            }),
            &["agent_id", "content"],
        ),
        ToolName::CreateProceduralMemory => definition(
            name,
            "Store a procedural memory with ordered steps.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "content": schema_for_string("Procedure summary."),
                "steps": schema_for_string_array("Ordered procedure steps."),
                "proficiency": schema_for_number("Proficiency in [0, 1].")
            }),
            &["agent_id", "content"],
        ),
        ToolName::RetrieveMemories => definition(
            name,
            "Retrieve an agent's memories ranked by relevance to a query.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "query": schema_for_string("Relevance query text."),
                "memory_type": schema_for_string("Restrict to one memory type."),
                "limit": schema_for_count("Maximum memories to return."),
                "min_relevance": schema_for_number("Minimum relevance score in [0, 1].")
            }),
            &["agent_id", "query"],
        ),
        ToolName::ListMemories => definition(
            name,
            "List an agent's stored memories, optionally filtered by type.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "memory_type": schema_for_string("Restrict to one memory type."),
                "limit": schema_for_count("Maximum memories to return."),
                "offset": schema_for_offset("Number of memories to skip.")
            }),
            &["agent_id"],
        ),
        ToolName::GetWorkingMemory => definition(
            name,
            "Fetch the current working memory of an agent.",
            &json!({
                "agent_id": schema_identifier("Owning agent.")
            }),
            &["agent_id"],
        ),
        ToolName::ConsolidateMemories => definition(
            name,
            "Consolidate an agent's memories, promoting important ones.",
            &json!({
                "agent_id": schema_identifier("Owning agent."),
                "consolidation_type": schema_for_string(
                    "Consolidation mode; the backend defaults to 'background'."
                )
            }),
            &["agent_id"],
        ),
        ToolName::UpdateMemoryImportance => definition(
            name,
            "Update the importance score of a stored memory.",
            &json!({
                "memory_id": schema_identifier("Memory identifier."),
                "importance": schema_for_number("New importance score in [0, 1].")
            }),
            &["memory_id", "importance"],
        ),
        ToolName::AssociateMemories => definition(
            name,
            "Create an association between two stored memories.",
            &json!({
                "source_memory_id": schema_identifier("First memory."),
                "target_memory_id": schema_identifier("Second memory."),
                "association_type": schema_for_string("Association kind label."),
                "strength": schema_for_number("Association strength in [0, 1].")
            }),
            &["source_memory_id", "target_memory_id"],
        ),
        ToolName::GetMemoryStatistics => definition(
            name,
            "Fetch aggregate memory statistics for an agent.",
            &json!({
                "agent_id": schema_identifier("Owning agent.")
            }),
            &["agent_id"],
        ),
        ToolName::DeleteMemory => definition(
            name,
            "Delete a stored memory.",
            &json!({
                "memory_id": schema_identifier("Memory identifier.")
            }),
            &["memory_id"],
        ),
        ToolName::CreateWorkflow => definition(
            name,
            "Create a workflow from a named task list.",
            &json!({
                "name": schema_for_string("Workflow name."),
                "tasks": schema_for_object_array("Ordered task payloads."),
                "description": schema_for_string("Workflow description."),
                "strategy": schema_for_string("Execution strategy label."),
                "metadata": schema_for_object("Free-form workflow metadata.")
            }),
            &["name", "tasks"],
        ),
        ToolName::ExecuteWorkflow => definition(
            name,
            "Execute a previously created workflow.",
            &json!({
                "workflow_id": schema_identifier("Workflow identifier."),
                "context": schema_for_object("Execution context overrides.")
            }),
            &["workflow_id"],
        ),
        ToolName::DelegateTask => definition(
            name,
            "Delegate a task to the best-suited available agent.",
            &json!({
                "task_description": schema_for_string("What needs to be done."),
                "manager_id": schema_identifier("Manager initiating the delegation."),
                "required_capabilities": schema_for_string_array("Capabilities the assignee must hold."),
                "priority": schema_for_string("Task priority label.")
            }),
            &["task_description"],
        ),
        ToolName::DecomposeTask => definition(
            name,
            "Decompose a task into subtasks.",
            &json!({
                "task_id": schema_identifier("Task to decompose.")
            }),
            &["task_id"],
        ),
        ToolName::CreateSubtask => definition(
            name,
            "Create a subtask under a parent task.",
            &json!({
                "parent_task_id": schema_identifier("Parent task."),
                "description": schema_for_string("Subtask description."),
                "assigned_agent_id": schema_identifier("Agent to assign the subtask to."),
                "priority": schema_for_string("Subtask priority label.")
            }),
            &["parent_task_id", "description"],
        ),
        ToolName::AssignAgents => definition(
            name,
            "Assign a set of agents to a task.",
            &json!({
                "task_id": schema_identifier("Target task."),
                "agent_ids": schema_for_string_array("Agents to assign."),
                "strategy": schema_for_string("Assignment strategy label.")
            }),
            &["task_id", "agent_ids"],
        ),
        ToolName::UpdateTaskProgress => definition(
            name,
            "Update progress on a task.",
            &json!({
                "task_id": schema_identifier("Task identifier."),
                "progress": schema_for_number("Completion fraction in [0, 1]."),
                "status": schema_for_string("Task status label."),
                "notes": schema_for_string("Progress notes.")
            }),
            &["task_id", "progress"],
        ),
        ToolName::GetWorkflowStatus => definition(
            name,
            "Fetch the status of a workflow.",
            &json!({
                "workflow_id": schema_identifier("Workflow identifier.")
            }),
            &["workflow_id"],
        ),
        ToolName::GetTaskHierarchy => definition(
            name,
            "Fetch a task with its full subtask hierarchy.",
            &json!({
                "task_id": schema_identifier("Root task identifier.")
            }),
            &["task_id"],
        ),
        ToolName::OptimizeWorkflow => definition(
            name,
            "Optimize a workflow's execution plan.",
            &json!({
                "workflow_id": schema_identifier("Workflow identifier."),
                "optimization_goal": schema_for_string("Goal label, e.g. 'latency' or 'cost'.")
            }),
            &["workflow_id"],
        ),
        ToolName::GetOrchestrationAnalytics => definition(
            name,
            "Fetch orchestration performance analytics over a trailing window.",
            &json!({
                "time_period_days": schema_for_count("Trailing window in days (backend default 7).")
            }),
            &[],
        ),
        ToolName::GetAgentWorkload => definition(
            name,
            "Fetch current workload per agent.",
            &json!({
                "agent_type": schema_for_string("Restrict to one agent type.")
            }),
            &[],
        ),
        ToolName::SynchronizeCoordination => definition(
            name,
            "Synchronize coordination state across a set of agents.",
            &json!({
                "agent_ids": schema_for_string_array("Agents to synchronize."),
                "coordination_strategy": schema_for_string("Coordination strategy label.")
            }),
            &["agent_ids"],
        ),
        ToolName::CancelWorkflow => definition(
            name,
            "Cancel a running workflow, optionally recording a reason.",
            &json!({
                "workflow_id": schema_identifier("Workflow identifier."),
                "reason": schema_for_string("Why the workflow is being cancelled.")
            }),
            &["workflow_id"],
        ),
    }
}

// ============================================================================
// SECTION: Catalog Validation
// ============================================================================

/// Validates catalog and routing-table consistency.
///
/// Checks that tool names are unique, that every tool has a definition, that
/// every routing template is well-formed under `/api`, and that every path
/// placeholder and body-value field names a required property of the tool's
/// input schema.
///
/// # Errors
/// Returns a [`CatalogError`] describing the first inconsistency found.
pub fn validate_catalog() -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for tool in ToolName::ALL.iter().copied() {
        if !seen.insert(tool.as_str()) {
            return Err(CatalogError::DuplicateTool { tool: tool.as_str().to_string() });
        }
    }
    let definitions = tool_definitions();
    if definitions.len() != ToolName::ALL.len() {
        return Err(CatalogError::CountMismatch {
            definitions: definitions.len(),
            tools: ToolName::ALL.len(),
        });
    }
    for def in &definitions {
        validate_template(def)?;
    }
    Ok(())
}

/// Validates one tool's routing template against its input schema.
fn validate_template(def: &ToolDefinition) -> Result<(), CatalogError> {
    let rule = routing_rule(def.name);
    let malformed = |reason: &str| CatalogError::MalformedTemplate {
        tool: def.name.as_str().to_string(),
        reason: reason.to_string(),
    };
    if !rule.path_template.starts_with("/api/") {
        return Err(malformed("template must start with /api/"));
    }
    let required = required_properties(&def.input_schema);
    for segment in rule.path_template.split('/') {
        let is_placeholder = segment.starts_with('{');
        if is_placeholder != segment.ends_with('}') {
            return Err(malformed("unbalanced placeholder braces"));
        }
        if !is_placeholder {
            continue;
        }
        let key = &segment[1..segment.len() - 1];
        if key.is_empty() {
            return Err(malformed("empty placeholder"));
        }
        if !required.iter().any(|name| name == key) {
            return Err(malformed("placeholder is not a required schema property"));
        }
    }
    if let PayloadPolicy::BodyValue(field) = rule.payload {
        if !required.iter().any(|name| name == field) {
            return Err(malformed("body-value field is not a required schema property"));
        }
    }
    Ok(())
}

/// Extracts the `required` property names from an input schema.
fn required_properties(schema: &Value) -> Vec<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|entries| {
            entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// SECTION: Definition Helpers
// ============================================================================

/// Builds a [`ToolDefinition`] from its parts.
#[must_use]
fn definition(
    name: ToolName,
    description: &str,
    properties: &Value,
    required: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        name,
        description: description.to_string(),
        input_schema: tool_input_schema(properties, required),
    }
}

/// Builds a standard tool input schema wrapper.
#[must_use]
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds an object schema without the top-level `$schema` annotation.
#[must_use]
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "required": required_values,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Adds a `$schema` header to a top-level JSON schema.
#[must_use]
fn with_schema(schema: Value) -> Value {
    let Value::Object(mut map) = schema else {
        return schema;
    };
    map.insert(
        String::from("$schema"),
        Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
    );
    Value::Object(map)
}

// ============================================================================
// SECTION: Schema Helpers (Local)
// ============================================================================

/// Returns a schema describing identifiers.
#[must_use]
fn schema_identifier(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON schema for strings.
#[must_use]
fn schema_for_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON schema for string arrays.
#[must_use]
fn schema_for_string_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

/// Returns a JSON schema for arrays of objects.
#[must_use]
fn schema_for_object_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "object" },
        "description": description
    })
}

/// Returns a JSON schema for free-form objects.
#[must_use]
fn schema_for_object(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description
    })
}

/// Returns a JSON schema for numbers.
#[must_use]
fn schema_for_number(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description
    })
}

/// Returns a JSON schema for non-negative counts.
#[must_use]
fn schema_for_count(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}

/// Returns a JSON schema for pagination offsets.
#[must_use]
fn schema_for_offset(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "description": description
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
