//! Typed adapter failures.
//!
//! Adapters never decide the local HTTP status. They report what happened
//! (missing key, upstream status, empty result, transport failure) and the
//! relay classifies it.

use sumrelay_core::types::ProviderKind;
use thiserror::Error;

/// A failed summarization call.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No API key configured for the selected provider. Raised before any I/O.
    #[error("{} API key not configured", .provider.display_name())]
    CredentialMissing { provider: ProviderKind },

    /// The upstream answered with a non-2xx status.
    ///
    /// `body` is kept for logging only and must not be returned to callers.
    #[error("{} API returned HTTP {status}", .provider.display_name())]
    Upstream {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    /// The upstream answered 2xx but produced no candidates.
    #[error("No response generated from {}", .provider.display_name())]
    Empty { provider: ProviderKind },

    /// Connection, TLS, timeout, or body read failure.
    #[error("{} request failed: {source}", .provider.display_name())]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response that does not match the documented schema.
    #[error("Unexpected {} response: {reason}", .provider.display_name())]
    Malformed {
        provider: ProviderKind,
        reason: String,
    },
}

impl AdapterError {
    /// Wrap a transport error, stripping the request URL.
    ///
    /// The Gemini key travels in the query string, so URLs must never reach
    /// logs or messages.
    pub fn transport(provider: ProviderKind, source: reqwest::Error) -> Self {
        AdapterError::Transport {
            provider,
            source: source.without_url(),
        }
    }

    /// Wrap a failure while reading a 2xx body. Decode failures become
    /// [`AdapterError::Malformed`].
    pub fn body(provider: ProviderKind, source: reqwest::Error) -> Self {
        if source.is_decode() {
            AdapterError::Malformed {
                provider,
                reason: source.without_url().to_string(),
            }
        } else {
            Self::transport(provider, source)
        }
    }

    /// Upstream HTTP status, when the failure came from an upstream response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AdapterError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_missing_message() {
        let err = AdapterError::CredentialMissing {
            provider: ProviderKind::OpenAi,
        };
        assert_eq!(err.to_string(), "OpenAI API key not configured");

        let err = AdapterError::CredentialMissing {
            provider: ProviderKind::Gemini,
        };
        assert_eq!(err.to_string(), "Gemini API key not configured");
    }

    #[test]
    fn test_upstream_message_omits_body() {
        let err = AdapterError::Upstream {
            provider: ProviderKind::Gemini,
            status: 400,
            body: "API key not valid: AIza-secret".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API returned HTTP 400");
        assert_eq!(err.upstream_status(), Some(400));
    }

    #[test]
    fn test_empty_has_no_status() {
        let err = AdapterError::Empty {
            provider: ProviderKind::Gemini,
        };
        assert_eq!(err.to_string(), "No response generated from Gemini");
        assert_eq!(err.upstream_status(), None);
    }
}
