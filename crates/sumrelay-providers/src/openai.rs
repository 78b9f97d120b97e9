//! OpenAI adapter — chat completions with a fixed summarizer system prompt.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint, so `api_base`
//! can point at a proxy or a local mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use sumrelay_core::config::ProviderConfig;
use sumrelay_core::types::ProviderKind;
use sumrelay_core::utils::truncate_string;

use crate::error::AdapterError;
use crate::prompt;
use crate::traits::Summarizer;

/// Default API base when the config has none.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────
// OpenAiSummarizer
// ─────────────────────────────────────────────

/// Summarizer backed by the OpenAI chat completions API.
pub struct OpenAiSummarizer {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication. Empty means not configured.
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSummarizer")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl OpenAiSummarizer {
    /// Create an adapter from the provider config and a shared client.
    pub fn new(config: &ProviderConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    fn build_request<'a>(&'a self, text: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::user_prompt(text),
                },
            ],
            max_tokens: prompt::MAX_OUTPUT_TOKENS,
            temperature: prompt::TEMPERATURE,
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, AdapterError> {
        let provider = ProviderKind::OpenAi;
        if !self.is_configured() {
            return Err(AdapterError::CredentialMissing { provider });
        }

        debug!(
            provider = self.display_name(),
            model = %self.model,
            chars = text.chars().count(),
            "Calling summarization API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&self.build_request(text))
            .send()
            .await
            .map_err(|e| AdapterError::transport(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.display_name(),
                status = %status,
                body = %truncate_string(&body, 500),
                "API error"
            );
            return Err(AdapterError::Upstream {
                provider,
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::body(provider, e))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::Malformed {
                provider,
                reason: "no choices in response".to_string(),
            })?
            .message
            .content
            .ok_or_else(|| AdapterError::Malformed {
                provider,
                reason: "first choice has no content".to_string(),
            })?;

        let summary = content.trim().to_string();
        debug!(
            provider = self.display_name(),
            chars = summary.chars().count(),
            "Summary received"
        );
        Ok(summary)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
