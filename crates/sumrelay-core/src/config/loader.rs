//! Config loader — reads `~/.sumrelay/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.sumrelay/config.json`
//! 3. Environment variables `SUMRELAY_<SECTION>__<FIELD>` (override JSON)
//! 4. Bare `OPENAI_API_KEY` / `GEMINI_API_KEY` / `PORT`, for keys still unset

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, HttpConfig};
use crate::types::ProviderKind;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(mut config) => {
            reset_zero_timeouts(&mut config.http);
            config
        }
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// A zero timeout fails every upstream call, so fall back to the default.
fn reset_zero_timeouts(http: &mut HttpConfig) {
    let defaults = HttpConfig::default();
    if http.connect_timeout_secs == 0 {
        warn!(
            default = defaults.connect_timeout_secs,
            "ignoring zero http.connectTimeoutSecs"
        );
        http.connect_timeout_secs = defaults.connect_timeout_secs;
    }
    if http.request_timeout_secs == 0 {
        warn!(
            default = defaults.request_timeout_secs,
            "ignoring zero http.requestTimeoutSecs"
        );
        http.request_timeout_secs = defaults.request_timeout_secs;
    }
}

/// Parse a timeout override in whole seconds. Zero is rejected.
fn parse_timeout(key: &str, val: &str) -> Option<u64> {
    match val.parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!(key, value = %val, "ignoring invalid timeout override");
            None
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply process environment overrides on top of a loaded config.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_with(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`.
///
/// Supported keys:
/// - `SUMRELAY_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `SUMRELAY_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `SUMRELAY_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
/// - `OPENAI_API_KEY` / `GEMINI_API_KEY` → key, only when still empty
/// - `SUMRELAY_SERVER__HOST` → `server.host`
/// - `SUMRELAY_SERVER__PORT`, then `PORT` → `server.port`
/// - `SUMRELAY_HTTP__CONNECT_TIMEOUT_SECS` → `http.connect_timeout_secs`
/// - `SUMRELAY_HTTP__REQUEST_TIMEOUT_SECS` → `http.request_timeout_secs`
///
/// Unparseable numbers and zero timeouts are ignored with a warning.
pub fn apply_overrides_with<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    for kind in ProviderKind::ALL {
        let name = kind.as_str().to_uppercase();
        let provider = config.providers.get_mut(kind);

        if let Some(val) = lookup(&format!("SUMRELAY_PROVIDERS__{name}__API_KEY")) {
            provider.api_key = val;
        }
        if provider.api_key.is_empty() {
            if let Some(val) = lookup(&format!("{name}_API_KEY")) {
                provider.api_key = val;
            }
        }
        if let Some(val) = lookup(&format!("SUMRELAY_PROVIDERS__{name}__API_BASE")) {
            provider.api_base = Some(val);
        }
        if let Some(val) = lookup(&format!("SUMRELAY_PROVIDERS__{name}__MODEL")) {
            provider.model = Some(val);
        }
    }

    // Server
    if let Some(val) = lookup("SUMRELAY_SERVER__HOST") {
        config.server.host = val;
    }
    let port = lookup("SUMRELAY_SERVER__PORT").or_else(|| lookup("PORT"));
    if let Some(val) = port {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!(value = %val, "ignoring invalid port override"),
        }
    }

    // Outbound HTTP
    const CONNECT_KEY: &str = "SUMRELAY_HTTP__CONNECT_TIMEOUT_SECS";
    const REQUEST_KEY: &str = "SUMRELAY_HTTP__REQUEST_TIMEOUT_SECS";
    if let Some(n) = lookup(CONNECT_KEY).and_then(|val| parse_timeout(CONNECT_KEY, &val)) {
        config.http.connect_timeout_secs = n;
    }
    if let Some(n) = lookup(REQUEST_KEY).and_then(|val| parse_timeout(REQUEST_KEY, &val)) {
        config.http.request_timeout_secs = n;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
