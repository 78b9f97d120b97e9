//! Request validation and provider dispatch.
//!
//! [`Dispatcher::handle`] is the whole relay contract: validate the JSON body,
//! route to the adapter for the normalized provider, and turn any failure
//! into a [`RelayError`]. It performs no I/O of its own.

use serde_json::Value;
use tracing::{debug, warn};

use sumrelay_core::types::{ProviderKind, SummarizeRequest, SummarizeResult};
use sumrelay_providers::{AdapterError, ProviderRegistry};

use crate::error::RelayError;

/// Validate a raw request body.
///
/// - `text` must be a non-empty JSON string.
/// - `provider`, when present and not `null`, must be a string naming a
///   known provider (case-insensitive). Defaults to OpenAI.
///
/// `text` is checked first, so a body failing both reports the text error.
pub fn validate(body: &Value) -> Result<SummarizeRequest, RelayError> {
    let text = match body.get("text") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => return Err(RelayError::invalid_text()),
    };

    let provider = match body.get("provider") {
        None | Some(Value::Null) => ProviderKind::default(),
        Some(Value::String(name)) => {
            ProviderKind::parse(name).ok_or_else(RelayError::invalid_provider)?
        }
        Some(_) => return Err(RelayError::invalid_provider()),
    };

    Ok(SummarizeRequest { text, provider })
}

/// Routes validated requests to the registered adapters.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: ProviderRegistry,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Validate, dispatch, and classify.
    pub async fn handle(&self, body: &Value) -> Result<SummarizeResult, RelayError> {
        let request = validate(body).inspect_err(|e| {
            debug!(error = %e, "Rejected invalid request");
        })?;
        self.summarize(request).await
    }

    /// Dispatch an already validated request.
    pub async fn summarize(&self, request: SummarizeRequest) -> Result<SummarizeResult, RelayError> {
        let provider = request.provider;

        let result = match self.registry.get(provider) {
            Some(adapter) => adapter.summarize(&request.text).await,
            None => Err(AdapterError::CredentialMissing { provider }),
        };

        match result {
            Ok(summary) => Ok(SummarizeResult { summary, provider }),
            Err(err) => {
                warn!(
                    provider = provider.as_str(),
                    upstream_status = ?err.upstream_status(),
                    error = %err,
                    "Summarization failed"
                );
                Err(err.into())
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use sumrelay_providers::Summarizer;

    /// Adapter double: counts calls and returns a scripted outcome.
    struct ScriptedAdapter {
        kind: ProviderKind,
        configured: bool,
        outcome: fn(ProviderKind) -> Result<String, AdapterError>,
        calls: AtomicUsize,
    }

    impl ScriptedAdapter {
        fn new(kind: ProviderKind, outcome: fn(ProviderKind) -> Result<String, AdapterError>) -> Arc<Self> {
            Arc::new(Self {
                kind,
                configured: true,
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Summarizer for ScriptedAdapter {
        async fn summarize(&self, _text: &str) -> Result<String, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)(self.kind)
        }

        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn ok(_: ProviderKind) -> Result<String, AdapterError> {
        Ok("A fox jumps.".to_string())
    }

    fn rate_limited(provider: ProviderKind) -> Result<String, AdapterError> {
        Err(AdapterError::Upstream {
            provider,
            status: 429,
            body: "slow down".to_string(),
        })
    }

    fn dispatcher(adapters: &[Arc<ScriptedAdapter>]) -> Dispatcher {
        let mut registry = ProviderRegistry::new();
        for adapter in adapters {
            registry.register(adapter.clone());
        }
        Dispatcher::new(registry)
    }

    // ── validate ──

    #[test]
    fn test_validate_defaults_to_openai() {
        let request = validate(&json!({"text": "hello"})).unwrap();
        assert_eq!(request.provider, ProviderKind::OpenAi);
        assert_eq!(request.text, "hello");
    }

    #[test]
    fn test_validate_null_provider_defaults() {
        let request = validate(&json!({"text": "hello", "provider": null})).unwrap();
        assert_eq!(request.provider, ProviderKind::OpenAi);
    }

    #[test]
    fn test_validate_case_insensitive_provider() {
        for name in ["openai", "OpenAI", "OPENAI"] {
            let request = validate(&json!({"text": "t", "provider": name})).unwrap();
            assert_eq!(request.provider, ProviderKind::OpenAi);
        }
        let request = validate(&json!({"text": "t", "provider": "GEMINI"})).unwrap();
        assert_eq!(request.provider, ProviderKind::Gemini);
    }

    #[test]
    fn test_validate_rejects_bad_text() {
        let bodies = [
            json!({}),
            json!({"provider": "gemini"}),
            json!({"text": null}),
            json!({"text": ""}),
            json!({"text": 42}),
            json!({"text": ["a", "b"]}),
            json!({"text": {"nested": "x"}}),
            json!({"text": true}),
            json!("just a string"),
            json!(null),
        ];
        for body in bodies {
            let err = validate(&body).unwrap_err();
            assert_eq!(err, RelayError::invalid_text(), "body: {body}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_provider() {
        let bodies = [
            json!({"text": "t", "provider": "anthropic"}),
            json!({"text": "t", "provider": ""}),
            json!({"text": "t", "provider": 1}),
            json!({"text": "t", "provider": ["openai"]}),
        ];
        for body in bodies {
            let err = validate(&body).unwrap_err();
            assert_eq!(err, RelayError::invalid_provider(), "body: {body}");
        }
    }

    #[test]
    fn test_validate_text_checked_first() {
        let err = validate(&json!({"provider": "nope"})).unwrap_err();
        assert_eq!(err, RelayError::invalid_text());
    }

    #[test]
    fn test_validate_keeps_whitespace_text_verbatim() {
        let request = validate(&json!({"text": "  padded  "})).unwrap();
        assert_eq!(request.text, "  padded  ");
    }

    // ── handle ──

    #[tokio::test]
    async fn test_handle_success_uses_normalized_provider() {
        let gemini = ScriptedAdapter::new(ProviderKind::Gemini, ok);
        let d = dispatcher(&[gemini.clone()]);

        let result = d
            .handle(&json!({"text": "The quick brown fox...", "provider": "Gemini"}))
            .await
            .unwrap();
        assert_eq!(result.summary, "A fox jumps.");
        assert_eq!(result.provider, ProviderKind::Gemini);
        assert_eq!(gemini.calls(), 1);
    }

    #[tokio::test]
    async fn test_handle_invalid_input_makes_no_call() {
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, ok);
        let gemini = ScriptedAdapter::new(ProviderKind::Gemini, ok);
        let d = dispatcher(&[openai.clone(), gemini.clone()]);

        for body in [
            json!({"provider": "gemini"}),
            json!({"text": 7}),
            json!({"text": "x", "provider": "mistral"}),
        ] {
            let err = d.handle(&body).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidInput);
        }
        assert_eq!(openai.calls(), 0);
        assert_eq!(gemini.calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_routes_only_selected_provider() {
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, ok);
        let gemini = ScriptedAdapter::new(ProviderKind::Gemini, ok);
        let d = dispatcher(&[openai.clone(), gemini.clone()]);

        d.handle(&json!({"text": "x"})).await.unwrap();
        assert_eq!(openai.calls(), 1);
        assert_eq!(gemini.calls(), 0);
    }

    #[tokio::test]
    async fn test_handle_maps_adapter_error() {
        let openai = ScriptedAdapter::new(ProviderKind::OpenAi, rate_limited);
        let d = dispatcher(&[openai]);

        let err = d.handle(&json!({"text": "x"})).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UpstreamRateLimited);
        assert_eq!(err.upstream_status, Some(429));
        assert!(!err.message.contains("slow down"));
    }

    #[tokio::test]
    async fn test_handle_unregistered_provider_is_credential_missing() {
        let d = dispatcher(&[]);
        let err = d
            .handle(&json!({"text": "x", "provider": "gemini"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CredentialMissing);
        assert_eq!(err.message, "Gemini API key not configured");
    }

    #[tokio::test]
    async fn test_handle_real_adapter_without_key() {
        let registry =
            ProviderRegistry::from_config(&sumrelay_core::config::Config::default()).unwrap();
        let d = Dispatcher::new(registry);

        let err = d.handle(&json!({"text": "hello"})).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::CredentialMissing);
        assert_eq!(err.message, "OpenAI API key not configured");
    }
}
