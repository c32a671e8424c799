// crates/zv-gateway-mcp/src/main.rs
// ============================================================================
// Module: Gateway Binary Entry Point
// Description: Loads configuration and runs the stdio gateway server.
// Purpose: Provide the zv-gateway executable.
// Dependencies: zv-gateway-mcp, zv-gateway-config, tokio
// ============================================================================

//! ## Overview
//! The `zv-gateway` binary takes one optional argument, a config file path,
//! falling back to the `ZV_GATEWAY_CONFIG` environment variable and then to
//! built-in defaults. Startup is fail-closed: an invalid config, an invalid
//! backend URL, or an inconsistent tool catalog exits nonzero before any
//! frame is read. Stdout carries protocol frames only; diagnostics go to
//! stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use zv_gateway_config::GatewayConfig;
use zv_gateway_mcp::GatewayServer;
use zv_gateway_mcp::NoopMetrics;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Binary entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => emit_error(&message),
    }
}

/// Loads configuration and serves until shutdown.
async fn run() -> Result<(), String> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GatewayConfig::load(config_path.as_deref())
        .map_err(|error| format!("config load failed: {error}"))?;
    let server = GatewayServer::from_config(&config, Arc::new(NoopMetrics))
        .map_err(|error| format!("server startup failed: {error}"))?;
    server.run().await.map_err(|error| format!("server failed: {error}"))
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Writes a line to stderr, ignoring stream failures.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Reports a fatal error and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
