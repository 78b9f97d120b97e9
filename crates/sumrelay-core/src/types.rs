//! Core types for Sumrelay — the request/response contract of `POST /summarize`.
//!
//! Everything here is request-scoped: created when a request arrives and
//! dropped once the response is written.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────
// Provider identifier
// ─────────────────────────────────────────────

/// One of the supported summarization backends.
///
/// Serialized in lower case (`"openai"`, `"gemini"`), which is also the
/// normalized form returned to callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// All providers, in display order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::Gemini];

    /// Normalized identifier (e.g. `"openai"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Human-readable name for logs and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Gemini",
        }
    }

    /// Case-insensitive lookup by identifier.
    ///
    /// `"OpenAI"`, `"OPENAI"` and `"openai"` all resolve to [`ProviderKind::OpenAi`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Request / result
// ─────────────────────────────────────────────

/// A validated summarization request.
///
/// Only constructed after the inbound body passed validation, so `text` is
/// always a non-empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummarizeRequest {
    pub text: String,
    pub provider: ProviderKind,
}

/// The success body of `POST /summarize`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResult {
    /// Trimmed summary text from the provider.
    pub summary: String,
    /// Normalized provider that produced the summary.
    pub provider: ProviderKind,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
