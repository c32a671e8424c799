// crates/zv-gateway-config/src/tests.rs
// ============================================================================
// Module: Gateway Config Unit Tests
// Description: Unit tests for defaults and semantic validation.
// Purpose: Validate constraint bounds without touching the filesystem.
// Dependencies: zv-gateway-config
// ============================================================================

//! ## Overview
//! Validates built-in defaults and the semantic constraints enforced by
//! `GatewayConfig::validate`.

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

use crate::GatewayConfig;

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn defaults_are_valid() {
    let config = GatewayConfig::default();
    config.validate().unwrap();
    assert_eq!(config.backend.base_url, "http://localhost:8000");
    assert_eq!(config.backend.timeout_ms, 30_000);
    assert!(config.backend.api_token.is_none());
    assert_eq!(config.server.shutdown_grace_ms, 10_000);
}

#[test]
fn empty_toml_parses_to_defaults() {
    let config: GatewayConfig = toml::from_str("").unwrap();
    assert_eq!(config, GatewayConfig::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let result: Result<GatewayConfig, _> = toml::from_str("[backend]\nretries = 3\n");
    assert!(result.is_err());
}

// ============================================================================
// SECTION: Validation Bounds
// ============================================================================

#[test]
fn rejects_non_http_scheme() {
    let mut config = GatewayConfig::default();
    config.backend.base_url = String::from("ftp://localhost:8000");
    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("scheme must be http or https"));
}

#[test]
fn rejects_unparseable_base_url() {
    let mut config = GatewayConfig::default();
    config.backend.base_url = String::from("not a url");
    assert!(config.validate().is_err());
}

#[test]
fn rejects_timeout_out_of_bounds() {
    let mut config = GatewayConfig::default();
    config.backend.timeout_ms = 500;
    assert!(config.validate().is_err());
    config.backend.timeout_ms = 300_001;
    assert!(config.validate().is_err());
    config.backend.timeout_ms = 30_000;
    config.validate().unwrap();
}

#[test]
fn rejects_blank_or_padded_token() {
    let mut config = GatewayConfig::default();
    config.backend.api_token = Some(String::new());
    assert!(config.validate().is_err());
    config.backend.api_token = Some(String::from(" zv-secret "));
    assert!(config.validate().is_err());
    config.backend.api_token = Some(String::from("zv-secret"));
    config.validate().unwrap();
}

#[test]
fn rejects_tiny_frame_limit() {
    let mut config = GatewayConfig::default();
    config.server.max_frame_bytes = 16;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_excessive_grace_window() {
    let mut config = GatewayConfig::default();
    config.server.shutdown_grace_ms = 600_000;
    assert!(config.validate().is_err());
}
