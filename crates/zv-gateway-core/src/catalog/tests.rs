// crates/zv-gateway-core/src/catalog/tests.rs
// ============================================================================
// Module: Gateway Catalog Tests
// Description: Unit tests for tool catalog consistency and stability.
// Purpose: Validate naming, ordering, grouping, and schema shape guarantees.
// Dependencies: zv-gateway-core
// ============================================================================

//! ## Overview
//! Validates that the catalog is internally consistent: unique names, stable
//! order, a routing rule per tool, and input schemas that carry the draft
//! 2020-12 header and closed property sets.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;

use crate::catalog::ToolGroup;
use crate::catalog::ToolName;
use crate::catalog::definition_for;
use crate::catalog::tool_definitions;
use crate::catalog::validate_catalog;

// ============================================================================
// SECTION: Catalog Consistency
// ============================================================================

#[test]
fn catalog_passes_validation() {
    validate_catalog().unwrap();
}

#[test]
fn tool_names_are_unique_and_round_trip() {
    let mut seen = BTreeSet::new();
    for tool in ToolName::ALL.iter().copied() {
        assert!(seen.insert(tool.as_str()), "duplicate name {}", tool.as_str());
        assert_eq!(ToolName::parse(tool.as_str()), Some(tool));
    }
}

#[test]
fn unknown_name_does_not_parse() {
    assert_eq!(ToolName::parse("summon_demon"), None);
    assert_eq!(ToolName::parse(""), None);
    assert_eq!(ToolName::parse("CREATE_AGENT"), None);
}

#[test]
fn definitions_follow_catalog_order() {
    let definitions = tool_definitions();
    assert_eq!(definitions.len(), ToolName::ALL.len());
    for (definition, tool) in definitions.iter().zip(ToolName::ALL.iter().copied()) {
        assert_eq!(definition.name, tool);
    }
}

#[test]
fn listing_is_deterministic() {
    assert_eq!(tool_definitions(), tool_definitions());
}

#[test]
fn groups_partition_the_catalog() {
    let agents = ToolName::ALL.iter().filter(|t| t.group() == ToolGroup::Agents).count();
    let consciousness =
        ToolName::ALL.iter().filter(|t| t.group() == ToolGroup::Consciousness).count();
    let memory = ToolName::ALL.iter().filter(|t| t.group() == ToolGroup::Memory).count();
    let orchestration =
        ToolName::ALL.iter().filter(|t| t.group() == ToolGroup::Orchestration).count();
    assert_eq!(agents, 14);
    assert_eq!(consciousness, 8);
    assert_eq!(memory, 12);
    assert_eq!(orchestration, 14);
    assert_eq!(agents + consciousness + memory + orchestration, ToolName::ALL.len());
}

// ============================================================================
// SECTION: Schema Shape
// ============================================================================

#[test]
fn schemas_are_closed_objects_with_draft_header() {
    for definition in tool_definitions() {
        let schema = &definition.input_schema;
        assert_eq!(
            schema.get("$schema").and_then(Value::as_str),
            Some("https://json-schema.org/draft/2020-12/schema"),
            "missing draft header for {}",
            definition.name
        );
        assert_eq!(schema.get("type").and_then(Value::as_str), Some("object"));
        assert_eq!(schema.get("additionalProperties"), Some(&Value::Bool(false)));
        assert!(schema.get("properties").is_some_and(Value::is_object));
    }
}

#[test]
fn required_keys_are_declared_properties() {
    for definition in tool_definitions() {
        let schema = &definition.input_schema;
        let properties = schema.get("properties").and_then(Value::as_object).unwrap();
        let required = schema.get("required").and_then(Value::as_array).unwrap();
        for key in required.iter().filter_map(Value::as_str) {
            assert!(
                properties.contains_key(key),
                "tool {} requires undeclared property {key}",
                definition.name
            );
        }
    }
}

#[test]
fn wire_serialization_uses_camel_case_schema_key() {
    let definition = definition_for(ToolName::GetAgent);
    let wire = serde_json::to_value(&definition).unwrap();
    assert_eq!(wire.get("name").and_then(Value::as_str), Some("get_agent"));
    assert!(wire.get("inputSchema").is_some());
    assert!(wire.get("input_schema").is_none());
}

#[test]
fn descriptions_are_nonempty() {
    for definition in tool_definitions() {
        assert!(!definition.description.is_empty(), "empty description for {}", definition.name);
    }
}
