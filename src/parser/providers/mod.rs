//! LLM provider implementations
//!
//! Each provider adapts one external text-completion API behind the
//! [`LlmProvider`] trait. Every request is single-shot and bounded by a
//! client timeout; retry policy is not a provider concern because any failed
//! call falls through to the rule-based parser.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Timeout applied to every provider HTTP request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Trait for LLM providers that turn a parsing prompt into strictly-JSON
/// output
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the instruction template plus query and return the raw response
    /// text, which is expected to be a single JSON object.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name (for logging and error messages)
    fn name(&self) -> &str;

    /// Default model identifier
    fn default_model(&self) -> &str;
}

/// Create a provider instance from name and API key
pub fn create_provider(
    provider_name: &str,
    api_key: String,
    model: Option<String>,
) -> Result<Box<dyn LlmProvider>> {
    match provider_name.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(gemini::GeminiProvider::new(api_key, model)?)),
        "openai" => Ok(Box::new(openai::OpenAiProvider::new(api_key, model)?)),
        "anthropic" => Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)?)),
        _ => anyhow::bail!(
            "Unknown provider: {}. Supported: gemini, openai, anthropic",
            provider_name
        ),
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}
