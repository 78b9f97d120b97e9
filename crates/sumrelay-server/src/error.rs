//! Local error contract — every failure resolves to one kind and one status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use sumrelay_core::types::ProviderKind;
use sumrelay_providers::AdapterError;

pub const INVALID_TEXT_MESSAGE: &str =
    "Invalid input. Please provide a \"text\" field with string content.";
pub const INVALID_PROVIDER_MESSAGE: &str =
    "Invalid provider. Supported providers are \"openai\" and \"gemini\".";
const RATE_LIMITED_MESSAGE: &str = "API rate limit exceeded";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failure classes of `POST /summarize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    CredentialMissing,
    UpstreamUnauthorized,
    UpstreamBadRequest,
    UpstreamRateLimited,
    UpstreamEmpty,
    Unknown,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput | ErrorKind::UpstreamBadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamUnauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::CredentialMissing | ErrorKind::UpstreamEmpty | ErrorKind::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// A classified failure, ready to be written as `{"error": message}`.
///
/// `message` is always sanitized: upstream bodies never end up here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RelayError {
    pub kind: ErrorKind,
    pub message: String,
    pub upstream_status: Option<u16>,
}

impl RelayError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            upstream_status: None,
        }
    }

    /// `text` missing, not a string, or empty.
    pub fn invalid_text() -> Self {
        Self::new(ErrorKind::InvalidInput, INVALID_TEXT_MESSAGE)
    }

    /// `provider` not one of the known identifiers.
    pub fn invalid_provider() -> Self {
        Self::new(ErrorKind::InvalidInput, INVALID_PROVIDER_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl From<AdapterError> for RelayError {
    fn from(err: AdapterError) -> Self {
        let upstream_status = err.upstream_status();
        let (kind, message) = match &err {
            AdapterError::CredentialMissing { .. } => {
                (ErrorKind::CredentialMissing, err.to_string())
            }
            AdapterError::Upstream {
                provider, status, ..
            } => classify_upstream(*provider, *status),
            AdapterError::Empty { .. } => (ErrorKind::UpstreamEmpty, INTERNAL_MESSAGE.to_string()),
            AdapterError::Transport { .. } | AdapterError::Malformed { .. } => {
                (ErrorKind::Unknown, INTERNAL_MESSAGE.to_string())
            }
        };
        Self {
            kind,
            message,
            upstream_status,
        }
    }
}

/// Map an upstream status to a local kind.
///
/// Provider-specific: 401 only means "bad key" for OpenAI, and 400 only for
/// Gemini. These follow provider documentation, not a guarantee.
fn classify_upstream(provider: ProviderKind, status: u16) -> (ErrorKind, String) {
    match (provider, status) {
        (ProviderKind::OpenAi, 401) => (
            ErrorKind::UpstreamUnauthorized,
            "Invalid OpenAI API key".to_string(),
        ),
        (ProviderKind::Gemini, 400) => (
            ErrorKind::UpstreamBadRequest,
            "Invalid Gemini API key or request format".to_string(),
        ),
        (_, 429) => (
            ErrorKind::UpstreamRateLimited,
            RATE_LIMITED_MESSAGE.to_string(),
        ),
        _ => (ErrorKind::Unknown, INTERNAL_MESSAGE.to_string()),
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
