// crates/zv-gateway-config/src/lib.rs
// ============================================================================
// Module: Zero Vector Gateway Configuration
// Description: TOML configuration loading with fail-closed validation.
// Purpose: Produce a validated GatewayConfig from file, env, or defaults.
// Dependencies: serde, toml, url, thiserror
// ============================================================================

//! ## Overview
//! Configuration for the gateway binary. Load order: an explicit path wins,
//! then the `ZV_GATEWAY_CONFIG` environment variable, then built-in defaults.
//! `ZV_GATEWAY_API_URL` and `ZV_GATEWAY_API_TOKEN` override the backend
//! section after file parsing so deployments can inject credentials without
//! writing them to disk. Every load path ends in [`GatewayConfig::validate`];
//! an invalid config never reaches the server.
//! Security posture: config files are untrusted input; loading enforces
//! path, size, and encoding limits and unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file path.
pub const CONFIG_PATH_ENV: &str = "ZV_GATEWAY_CONFIG";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "ZV_GATEWAY_API_URL";

/// Environment variable overriding the backend bearer token.
pub const API_TOKEN_ENV: &str = "ZV_GATEWAY_API_TOKEN";

/// Maximum accepted config path length in bytes.
const MAX_CONFIG_PATH_BYTES: usize = 4_096;

/// Maximum accepted length for a single path component.
const MAX_PATH_COMPONENT_BYTES: usize = 255;

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576;

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default backend request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default cap on backend response bodies in bytes.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1_048_576;

/// Default cap on inbound stdio frames in bytes.
const DEFAULT_MAX_FRAME_BYTES: usize = 1_048_576;

/// Default shutdown drain window in milliseconds.
const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 10_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config path exceeded the length limit.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// A config path component exceeded the component limit.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// Config file could not be read.
    #[error("config file could not be read: {0}")]
    Read(#[from] std::io::Error),
    /// Config file exceeded the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// Config file was not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Config file failed TOML parsing.
    #[error("config file failed to parse: {0}")]
    Parse(#[from] toml::de::Error),
    /// Config contents failed semantic validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Backend connection settings.
///
/// # Invariants
/// - `base_url` parses as an `http`/`https` URL with a host.
/// - `timeout_ms` is within `1_000..=300_000`.
/// - `api_token`, when present, is non-empty and has no surrounding
///   whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BackendConfig {
    /// Base URL of the Zero Vector backend.
    pub base_url: String,
    /// Optional static bearer token sent with every backend request.
    pub api_token: Option<String>,
    /// Total request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Hard cap on backend response body size in bytes.
    pub max_response_bytes: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            api_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Stdio transport settings.
///
/// # Invariants
/// - `max_frame_bytes` is within `1_024..=16_777_216`.
/// - `shutdown_grace_ms` is at most `120_000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Hard cap on inbound frame payload size in bytes.
    pub max_frame_bytes: usize,
    /// How long shutdown waits for in-flight calls, in milliseconds.
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

/// Root gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GatewayConfig {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Stdio transport settings.
    pub server: ServerConfig,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl GatewayConfig {
    /// Loads configuration from `path`, the `ZV_GATEWAY_CONFIG` environment
    /// variable, or built-in defaults, then applies environment overrides
    /// and validates the result.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the path violates limits, the file is
    /// unreadable, oversized, non-UTF-8, fails TOML parsing, or the parsed
    /// settings fail validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = env::var(CONFIG_PATH_ENV).ok();
        let selected = path
            .map(Path::to_path_buf)
            .or_else(|| env_path.map(std::path::PathBuf::from));
        let mut config = match selected {
            Some(file) => Self::load_file(&file)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file with fail-closed guards.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let bytes = fs::read(path)?;
        if bytes.len() as u64 > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        Ok(toml::from_str(&text)?)
    }

    /// Applies backend overrides from the process environment.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            self.backend.base_url = url;
        }
        if let Ok(token) = env::var(API_TOKEN_ENV) {
            self.backend.api_token = Some(token);
        }
    }

    /// Validates semantic constraints on the loaded settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.backend.base_url)
            .map_err(|error| ConfigError::Invalid(format!("backend.base_url: {error}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Invalid(String::from(
                "backend.base_url scheme must be http or https",
            )));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid(String::from("backend.base_url must have a host")));
        }
        if !(1_000..=300_000).contains(&self.backend.timeout_ms) {
            return Err(ConfigError::Invalid(String::from(
                "backend.timeout_ms must be within 1000..=300000",
            )));
        }
        if !(1_024..=64 * 1_048_576).contains(&self.backend.max_response_bytes) {
            return Err(ConfigError::Invalid(String::from(
                "backend.max_response_bytes must be within 1024..=67108864",
            )));
        }
        if let Some(token) = self.backend.api_token.as_deref() {
            if token.is_empty() || token.trim() != token {
                return Err(ConfigError::Invalid(String::from(
                    "backend.api_token must be non-empty without surrounding whitespace",
                )));
            }
        }
        if !(1_024..=16 * 1_048_576).contains(&self.server.max_frame_bytes) {
            return Err(ConfigError::Invalid(String::from(
                "server.max_frame_bytes must be within 1024..=16777216",
            )));
        }
        if self.server.shutdown_grace_ms > 120_000 {
            return Err(ConfigError::Invalid(String::from(
                "server.shutdown_grace_ms must be at most 120000",
            )));
        }
        Ok(())
    }
}

/// Validates config path length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_CONFIG_PATH_BYTES {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
