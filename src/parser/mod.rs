//! Query understanding strategies
//!
//! One contract, three implementations: the deterministic [`RuleParser`],
//! the provider-backed [`LlmParser`], and [`SmartParser`], which composes
//! the two so the LLM can never become a single point of failure. The
//! search engine only ever sees [`ParsedFilters`] and stays agnostic to
//! which strategy produced them.

pub mod llm;
pub mod providers;
pub mod rules;

pub use llm::LlmParser;
pub use rules::RuleParser;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::filters::ParsedFilters;

/// Contract shared by every query-understanding strategy
#[async_trait]
pub trait QueryParser: Send + Sync {
    /// Turn free text into structured filters.
    async fn parse(&self, query: &str) -> Result<ParsedFilters>;

    /// Strategy name (for logging)
    fn name(&self) -> &str;
}

#[async_trait]
impl QueryParser for RuleParser {
    async fn parse(&self, query: &str) -> Result<ParsedFilters> {
        Ok(RuleParser::parse(self, query))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[async_trait]
impl QueryParser for LlmParser {
    async fn parse(&self, query: &str) -> Result<ParsedFilters> {
        self.try_parse(query).await
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// LLM-with-fallback composition
///
/// Tries the LLM strategy exactly once per query when one is configured;
/// any failure (missing credential at build time, transport error, timeout,
/// malformed response) falls through to the rule-based parser for the same
/// input. Parsing through this type therefore never fails.
pub struct SmartParser {
    llm: Option<LlmParser>,
    rules: RuleParser,
}

impl SmartParser {
    pub fn new(llm: Option<LlmParser>) -> Self {
        Self { llm, rules: RuleParser::new() }
    }

    /// A parser that never consults an external provider.
    pub fn rules_only() -> Self {
        Self::new(None)
    }

    /// Build from configuration: uses the configured provider when the LLM
    /// strategy is enabled and a credential is available, otherwise runs
    /// rules-only. A missing credential is not an error here.
    pub fn from_config(config: &LlmConfig) -> Self {
        if !config.enabled {
            log::debug!("LLM parsing disabled by config, using rule-based parser");
            return Self::rules_only();
        }

        let api_key = match crate::config::get_api_key(&config.provider) {
            Ok(key) => key,
            Err(e) => {
                log::debug!("no credential for provider '{}' ({e:#}), using rule-based parser", config.provider);
                return Self::rules_only();
            }
        };

        let model = config.model.clone().or_else(|| crate::config::get_user_model(&config.provider));
        match providers::create_provider(&config.provider, api_key, model) {
            Ok(provider) => {
                log::info!("query parsing via {} with rule-based fallback", provider.name());
                Self::new(Some(LlmParser::new(provider)))
            }
            Err(e) => {
                log::warn!("failed to create provider '{}': {e:#}", config.provider);
                Self::rules_only()
            }
        }
    }

    /// Parse with fallback. Total: always returns a valid result.
    pub async fn parse(&self, query: &str) -> ParsedFilters {
        if let Some(llm) = &self.llm {
            match llm.try_parse(query).await {
                Ok(parsed) => return parsed,
                Err(e) => {
                    log::warn!(
                        "{} parse failed ({e:#}), falling back to rule-based parser",
                        llm.provider_name()
                    );
                }
            }
        }
        self.rules.parse(query)
    }
}

#[async_trait]
impl QueryParser for SmartParser {
    async fn parse(&self, query: &str) -> Result<ParsedFilters> {
        Ok(SmartParser::parse(self, query).await)
    }

    fn name(&self) -> &str {
        "smart"
    }
}
