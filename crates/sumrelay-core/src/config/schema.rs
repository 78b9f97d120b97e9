//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProvidersConfig`, `ServerConfig`, `HttpConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::ProviderKind;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded once at startup from
/// `~/.sumrelay/config.json` + env vars, then shared read-only.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub server: ServerConfig,
    pub http: HttpConfig,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Configuration for a single provider (credential, base URL, model).
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication. Empty means "not configured".
    pub api_key: String,
    /// Custom API base URL (overrides the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model override (otherwise the provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Keeps the key out of `{:?}` output.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &if self.is_configured() { "<set>" } else { "<empty>" })
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

/// One `ProviderConfig` per supported backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
}

impl ProvidersConfig {
    /// Get the config for a provider.
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Mutable access, used by env overrides.
    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Gemini => &mut self.gemini,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// Listen address for the HTTP relay.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Outbound HTTP
// ─────────────────────────────────────────────

/// Timeouts for outbound provider calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total request timeout (connect + send + read) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
