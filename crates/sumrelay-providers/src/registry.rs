//! Provider registry — one adapter per [`ProviderKind`], built once at startup.
//!
//! Both adapters are always registered. A provider without a key stays in
//! the registry and fails at request time, so one missing credential never
//! disables the other provider.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use sumrelay_core::config::Config;
use sumrelay_core::types::ProviderKind;

use crate::gemini::GeminiSummarizer;
use crate::http::build_client;
use crate::openai::OpenAiSummarizer;
use crate::traits::Summarizer;

/// Lookup table from provider identifier to adapter.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderKind, Arc<dyn Summarizer>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.availability())
            .finish()
    }
}

impl ProviderRegistry {
    /// An empty registry. Mostly useful in tests, together with [`register`](Self::register).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both adapters from the configuration, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_client(&config.http)?;

        let mut registry = Self::new();
        registry.register(Arc::new(OpenAiSummarizer::new(
            &config.providers.openai,
            client.clone(),
        )));
        registry.register(Arc::new(GeminiSummarizer::new(
            &config.providers.gemini,
            client,
        )));

        debug!(providers = ?registry.availability(), "Provider registry built");
        Ok(registry)
    }

    /// Add or replace the adapter for `adapter.kind()`.
    pub fn register(&mut self, adapter: Arc<dyn Summarizer>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// Adapter for a provider, if registered.
    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn Summarizer>> {
        self.adapters.get(&kind)
    }

    /// `(provider, has credential)` for every known provider, in display order.
    pub fn availability(&self) -> Vec<(ProviderKind, bool)> {
        ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                let configured = self.get(kind).is_some_and(|a| a.is_configured());
                (kind, configured)
            })
            .collect()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_registers_both() {
        let registry = ProviderRegistry::from_config(&Config::default()).unwrap();
        assert_eq!(
            registry.get(ProviderKind::OpenAi).unwrap().kind(),
            ProviderKind::OpenAi
        );
        assert_eq!(
            registry.get(ProviderKind::Gemini).unwrap().kind(),
            ProviderKind::Gemini
        );
    }

    #[test]
    fn test_availability_follows_keys() {
        let mut config = Config::default();
        config.providers.gemini.api_key = "gm".to_string();

        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(
            registry.availability(),
            vec![(ProviderKind::OpenAi, false), (ProviderKind::Gemini, true)]
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::new();
        assert!(registry.get(ProviderKind::OpenAi).is_none());
        assert_eq!(
            registry.availability(),
            vec![(ProviderKind::OpenAi, false), (ProviderKind::Gemini, false)]
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk".to_string();

        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(OpenAiSummarizer::new(
            &Config::default().providers.openai,
            reqwest::Client::new(),
        )));
        registry.register(Arc::new(OpenAiSummarizer::new(
            &config.providers.openai,
            reqwest::Client::new(),
        )));
        assert!(registry.get(ProviderKind::OpenAi).unwrap().is_configured());
    }
}
