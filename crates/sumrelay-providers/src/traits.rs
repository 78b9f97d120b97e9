//! Summarizer trait — the single capability every provider adapter offers.

use async_trait::async_trait;
use sumrelay_core::types::ProviderKind;

use crate::error::AdapterError;

/// A backend that turns text into a short summary.
///
/// Implementations make at most one outbound request per call, never retry,
/// and return the summary already trimmed.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`.
    ///
    /// Fails with [`AdapterError::CredentialMissing`] without touching the
    /// network when no key is configured.
    async fn summarize(&self, text: &str) -> Result<String, AdapterError>;

    /// Which provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Whether a credential is configured.
    fn is_configured(&self) -> bool;

    /// Display name for logging.
    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}
