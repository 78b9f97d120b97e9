//! Summarization provider layer for Sumrelay.
//!
//! # Architecture
//!
//! - [`traits::Summarizer`] — trait both adapters implement
//! - [`openai::OpenAiSummarizer`] — chat completions adapter
//! - [`gemini::GeminiSummarizer`] — generateContent adapter
//! - [`registry::ProviderRegistry`] — adapter lookup keyed on provider
//! - [`error::AdapterError`] — typed failure carrying the upstream status

pub mod error;
pub mod gemini;
pub mod http;
pub mod openai;
pub mod prompt;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use error::AdapterError;
pub use gemini::GeminiSummarizer;
pub use openai::OpenAiSummarizer;
pub use registry::ProviderRegistry;
pub use traits::Summarizer;
