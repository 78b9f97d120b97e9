//! Gemini adapter — `generateContent` with fixed safety settings.
//!
//! The wire format has no system role, so the instruction is folded into the
//! single user part. The key goes in the `key` query parameter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use sumrelay_core::config::ProviderConfig;
use sumrelay_core::types::ProviderKind;
use sumrelay_core::utils::truncate_string;

use crate::error::AdapterError;
use crate::prompt;
use crate::traits::Summarizer;

/// Default API base when the config has none.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Harm categories that get a blocking threshold on every request.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
    stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: prompt::TEMPERATURE,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: prompt::MAX_OUTPUT_TOKENS,
            stop_sequences: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

// ─────────────────────────────────────────────
// GeminiSummarizer
// ─────────────────────────────────────────────

/// Summarizer backed by the Gemini generative language API.
pub struct GeminiSummarizer {
    client: reqwest::Client,
    api_base: String,
    /// Sent as `?key=`. Empty means not configured.
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSummarizer")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl GeminiSummarizer {
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

    /// Endpoint URL without the key (the key is added as a query parameter).
    fn generate_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.model)
    }

    fn build_request(&self, text: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt::combined_prompt(text)),
                }],
            }],
            generation_config: GenerationConfig::default(),
            safety_settings: SAFETY_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, AdapterError> {
        let provider = ProviderKind::Gemini;
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
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
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

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::body(provider, e))?;

        let Some(candidate) = generated.candidates.into_iter().next() else {
            warn!(provider = self.display_name(), "No candidates in response");
            return Err(AdapterError::Empty { provider });
        };

        let finish_reason = candidate.finish_reason.unwrap_or_default();
        let text = candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| AdapterError::Malformed {
                provider,
                reason: format!("first candidate has no text part (finish reason: {finish_reason:?})"),
            })?;

        let summary = text.trim().to_string();
        debug!(
            provider = self.display_name(),
            chars = summary.chars().count(),
            finish_reason = %finish_reason,
            "Summary received"
        );
        Ok(summary)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
