//! LLM query parsing strategy
//!
//! Delegates the raw query plus a fixed instruction template to an external
//! text-completion provider and decodes the strictly-JSON reply into
//! [`ParsedFilters`]. This strategy is allowed to fail; the caller composes
//! it with the rule-based parser so a failure is never visible to the user.

use anyhow::{Context, Result};

use crate::filters::ParsedFilters;

use super::providers::LlmProvider;

/// Fixed instruction template, embedded at compile time.
const PROMPT_TEMPLATE: &str = include_str!("prompt_template.md");

/// Query parser backed by an external LLM provider
pub struct LlmParser {
    provider: Box<dyn LlmProvider>,
}

impl LlmParser {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Provider name, for logging.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Build the full prompt for one query.
    fn build_prompt(query: &str) -> String {
        format!("{PROMPT_TEMPLATE}\nQuery: {query:?}\nJSON:")
    }

    /// Ask the provider to parse one query. Transport errors, timeouts, and
    /// malformed JSON all surface as `Err`; the caller falls back to the
    /// rule-based parser.
    pub async fn try_parse(&self, query: &str) -> Result<ParsedFilters> {
        let prompt = Self::build_prompt(query);
        log::debug!("sending parse prompt to {} ({} chars)", self.provider.name(), prompt.len());

        let response = self.provider.complete(&prompt).await?;
        let json = strip_markdown_fences(&response);

        let parsed: ParsedFilters = serde_json::from_str(json)
            .with_context(|| format!("LLM returned non-decodable filters: {json:?}"))?;

        log::debug!("{} parsed {query:?} -> {parsed:?}", self.provider.name());
        Ok(parsed)
    }
}

/// Strip markdown code fences from an LLM response
///
/// Some models wrap JSON in markdown code fences even when explicitly
/// instructed not to.
///
/// Handles:
/// - ```json\n{...}\n```
/// - ```\n{...}\n```
/// - {raw JSON} (no-op, returns as-is)
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();

    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let without_start = if let Some(rest) = trimmed.strip_prefix("```json") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("```") {
            rest
        } else {
            return trimmed;
        };

        let without_end = without_start.strip_suffix("```").unwrap_or(without_start);

        without_end.trim()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueKind;
    use async_trait::async_trait;

    /// Provider stub returning a canned response (or an error).
    struct StubProvider {
        response: Result<String, String>,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(msg) => anyhow::bail!("{msg}"),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn default_model(&self) -> &str {
            "stub-model"
        }
    }

    fn parser_with(response: Result<String, String>) -> LlmParser {
        LlmParser::new(Box::new(StubProvider { response }))
    }

    #[test]
    fn test_strip_fences_json_block() {
        assert_eq!(strip_markdown_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_plain_block() {
        assert_eq!(strip_markdown_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        assert_eq!(strip_markdown_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_build_prompt_contains_query() {
        let prompt = LlmParser::build_prompt("coworking in goa");
        assert!(prompt.contains("coworking in goa"));
        assert!(prompt.contains("governmentScheme"));
        assert!(prompt.ends_with("JSON:"));
    }

    #[tokio::test]
    async fn test_try_parse_decodes_response() {
        let parser = parser_with(Ok(
            r#"{"type":"incubator","city":"Delhi","zeroEquity":true}"#.to_string()
        ));

        let parsed = parser.try_parse("zero equity incubators in delhi").await.unwrap();
        assert_eq!(parsed.kind, Some(VenueKind::Incubator));
        assert_eq!(parsed.city.as_deref(), Some("Delhi"));
        assert!(parsed.zero_equity);
    }

    #[tokio::test]
    async fn test_try_parse_strips_fences() {
        let parser =
            parser_with(Ok("```json\n{\"city\":\"Pune\"}\n```".to_string()));
        let parsed = parser.try_parse("pune").await.unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Pune"));
    }

    #[tokio::test]
    async fn test_try_parse_malformed_json_errors() {
        let parser = parser_with(Ok("I think you want coworking spaces!".to_string()));
        assert!(parser.try_parse("coworking").await.is_err());
    }

    #[tokio::test]
    async fn test_try_parse_transport_error_propagates() {
        let parser = parser_with(Err("connection refused".to_string()));
        assert!(parser.try_parse("coworking").await.is_err());
    }
}
