// crates/zv-gateway-mcp/src/client.rs
// ============================================================================
// Module: Backend HTTP Client
// Description: Bounded HTTP client for the Zero Vector backend API.
// Purpose: Execute exactly one backend request per planned tool call.
// Dependencies: zv-gateway-config, zv-gateway-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! [`BackendClient`] owns the single `reqwest::Client` used for every tool
//! call. It applies the configured timeout to the full request lifecycle,
//! disables redirects, declares a JSON content type on every request,
//! attaches the optional bearer token, and enforces a hard cap on response
//! body size. One [`execute`](BackendClient::execute)
//! call is one HTTP attempt; retry policy is deliberately absent.
//! Security posture: backend responses are untrusted input and size-capped;
//! error details are truncated and never include the bearer token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;
use zv_gateway_config::BackendConfig;
use zv_gateway_core::BackendRequest;
use zv_gateway_core::HttpMethod;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum bytes of a non-JSON error body echoed into diagnostics.
const MAX_DETAIL_BYTES: usize = 512;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building the client or executing a request.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The configured base URL or joined request URL was invalid.
    #[error("backend url invalid: {0}")]
    InvalidUrl(String),
    /// The underlying HTTP client could not be constructed.
    #[error("backend client could not be constructed: {0}")]
    Build(String),
    /// The request failed before a response arrived (includes timeouts).
    #[error("backend transport failure: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail or truncated body snippet.
        detail: String,
    },
    /// The response body exceeded the configured cap.
    #[error("backend response exceeded {limit} bytes")]
    ResponseTooLarge {
        /// Configured response size limit.
        limit: usize,
    },
    /// The response body was not valid JSON.
    #[error("backend response was not valid JSON: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client bound to one backend base URL.
///
/// # Invariants
/// - Every request uses the configured timeout; there are no per-call
///   overrides.
/// - Redirects are never followed.
/// - At most one HTTP attempt happens per [`BackendClient::execute`] call.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Shared reqwest client with timeout and redirect policy applied.
    http: Client,
    /// Validated backend base URL.
    base_url: Url,
    /// Optional bearer token attached to every request.
    bearer: Option<String>,
    /// Hard cap on response body size in bytes.
    max_response_bytes: usize,
}

impl BackendClient {
    /// Builds a client from validated backend configuration.
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidUrl`] when the base URL does not parse
    /// and [`BackendError::Build`] when the HTTP client cannot be created.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|error| BackendError::InvalidUrl(error.to_string()))?;
        // Every request declares JSON, body or not.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(|error| BackendError::Build(error.to_string()))?;
        Ok(Self {
            http,
            base_url,
            bearer: config.api_token.clone(),
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Executes one planned request and decodes the JSON response.
    ///
    /// Empty 2xx bodies decode to `Value::Null`.
    ///
    /// # Errors
    /// Returns a [`BackendError`] on URL join failure, transport failure,
    /// non-success status, oversized body, or undecodable body.
    pub async fn execute(&self, request: &BackendRequest) -> Result<Value, BackendError> {
        let url = self.request_url(request)?;
        let mut builder = self.http.request(convert_method(request.method), url);
        if let Some(token) = self.bearer.as_deref() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }
        let mut response = builder
            .send()
            .await
            .map_err(|error| BackendError::Transport(transport_detail(error)))?;
        let status = response.status();
        let mut collected: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|error| BackendError::Transport(transport_detail(error)))?
        {
            if collected.len() + chunk.len() > self.max_response_bytes {
                return Err(BackendError::ResponseTooLarge { limit: self.max_response_bytes });
            }
            collected.extend_from_slice(&chunk);
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail: extract_detail(&collected),
            });
        }
        if collected.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&collected)
            .map_err(|error| BackendError::Decode(error.to_string()))
    }

    /// Joins the base URL with the planned path and query pairs.
    fn request_url(&self, request: &BackendRequest) -> Result<Url, BackendError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|error| BackendError::InvalidUrl(error.to_string()))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps the routing method onto the reqwest method type.
fn convert_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Produces a token-free transport diagnostic.
fn transport_detail(error: reqwest::Error) -> String {
    if error.is_timeout() {
        return String::from("request timed out");
    }
    if error.is_connect() {
        return String::from("connection failed");
    }
    error.without_url().to_string()
}

/// Extracts the backend `detail` field or a truncated body snippet.
fn extract_detail(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(detail) = value.get("detail") {
            if let Some(text) = detail.as_str() {
                return text.to_string();
            }
            return detail.to_string();
        }
    }
    let text = String::from_utf8_lossy(body);
    let mut snippet: String = text.chars().take(MAX_DETAIL_BYTES).collect();
    if text.chars().count() > MAX_DETAIL_BYTES {
        snippet.push_str("...");
    }
    snippet
}

// ============================================================================
// SECTION: Tests
// ============================================================================
