//! Configuration for the LLM parsing strategy
//!
//! Lives in `~/.venuelens/config.toml`. The `[llm]` section selects the
//! provider; `[credentials]` holds per-provider API keys, with environment
//! variables as the fallback. Everything here is optional: with no config
//! file and no keys, search silently runs on the rule-based parser alone.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// LLM strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Enable the LLM parsing strategy
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// LLM provider (gemini, openai, anthropic)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Optional model override (uses provider default if None)
    #[serde(default)]
    pub model: Option<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "gemini".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self { enabled: true, provider: "gemini".to_string(), model: None }
    }
}

/// Directory holding the user config file (`~/.venuelens`).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".venuelens"))
}

/// Load the `[llm]` section from `config.toml` in the given directory.
///
/// Falls back to defaults if the file doesn't exist or the section is
/// missing.
pub fn load_llm_config(config_dir: &Path) -> Result<LlmConfig> {
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        log::debug!("no config.toml found, using default llm config");
        return Ok(LlmConfig::default());
    }

    let config_str =
        std::fs::read_to_string(&config_path).context("Failed to read config.toml")?;

    let toml_value: toml::Value =
        toml::from_str(&config_str).context("Failed to parse config.toml")?;

    if let Some(llm_table) = toml_value.get("llm") {
        let config: LlmConfig =
            llm_table.clone().try_into().context("Failed to parse [llm] section")?;
        Ok(config)
    } else {
        log::debug!("no [llm] section in config.toml, using defaults");
        Ok(LlmConfig::default())
    }
}

/// Load the `[llm]` section from the default location, with defaults on any
/// failure.
pub fn load_default_llm_config() -> LlmConfig {
    let Some(dir) = default_config_dir() else {
        return LlmConfig::default();
    };
    load_llm_config(&dir).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config ({e:#})");
        LlmConfig::default()
    })
}

/// User configuration structure for `~/.venuelens/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserConfig {
    #[serde(default)]
    credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credentials {
    #[serde(default)]
    gemini_api_key: Option<String>,
    #[serde(default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    anthropic_api_key: Option<String>,
    #[serde(default)]
    gemini_model: Option<String>,
    #[serde(default)]
    openai_model: Option<String>,
    #[serde(default)]
    anthropic_model: Option<String>,
}

fn load_user_config() -> Result<Option<UserConfig>> {
    let Some(config_dir) = default_config_dir() else {
        log::debug!("could not determine home directory");
        return Ok(None);
    };

    let config_path = config_dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }

    let config_str = std::fs::read_to_string(&config_path)
        .context("Failed to read ~/.venuelens/config.toml")?;

    let config: UserConfig =
        toml::from_str(&config_str).context("Failed to parse ~/.venuelens/config.toml")?;

    Ok(Some(config))
}

/// Get the API key for a provider
///
/// Checks in priority order:
/// 1. `[credentials]` in `~/.venuelens/config.toml`
/// 2. `{PROVIDER}_API_KEY` environment variable
/// 3. Error if not found
pub fn get_api_key(provider: &str) -> Result<String> {
    if let Ok(Some(user_config)) = load_user_config()
        && let Some(credentials) = &user_config.credentials
    {
        let key = match provider.to_lowercase().as_str() {
            "gemini" => credentials.gemini_api_key.as_ref(),
            "openai" => credentials.openai_api_key.as_ref(),
            "anthropic" => credentials.anthropic_api_key.as_ref(),
            _ => None,
        };

        if let Some(api_key) = key {
            log::debug!("using {} API key from ~/.venuelens/config.toml", provider);
            return Ok(api_key.clone());
        }
    }

    let env_var = match provider.to_lowercase().as_str() {
        "gemini" => "GEMINI_API_KEY",
        "openai" => "OPENAI_API_KEY",
        "anthropic" => "ANTHROPIC_API_KEY",
        _ => anyhow::bail!("Unknown provider: {}", provider),
    };

    env::var(env_var).with_context(|| {
        format!(
            "API key not found for provider '{}'. Set the {} environment variable \
             or add it under [credentials] in ~/.venuelens/config.toml",
            provider, env_var
        )
    })
}

/// Get the preferred model for a provider from user config
///
/// Returns None if no model is configured; the caller should use the
/// provider default.
pub fn get_user_model(provider: &str) -> Option<String> {
    if let Ok(Some(user_config)) = load_user_config()
        && let Some(credentials) = &user_config.credentials
    {
        let model = match provider.to_lowercase().as_str() {
            "gemini" => credentials.gemini_model.as_ref(),
            "openai" => credentials.openai_model.as_ref(),
            "anthropic" => credentials.anthropic_model.as_ref(),
            _ => None,
        };

        if let Some(model_name) = model {
            log::debug!("using {} model from ~/.venuelens/config.toml: {}", provider, model_name);
            return Some(model_name.clone());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert!(config.enabled);
        assert_eq!(config.provider, "gemini");
        assert_eq!(config.model, None);
    }

    #[test]
    fn test_load_config_no_file() {
        let temp = TempDir::new().unwrap();
        let config = load_llm_config(temp.path()).unwrap();

        assert_eq!(config.provider, "gemini");
        assert!(config.enabled);
    }

    #[test]
    fn test_load_config_with_llm_section() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            r#"
[llm]
enabled = true
provider = "anthropic"
model = "claude-3-5-haiku-20241022"
            "#,
        )
        .unwrap();

        let config = load_llm_config(temp.path()).unwrap();
        assert!(config.enabled);
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.model, Some("claude-3-5-haiku-20241022".to_string()));
    }

    #[test]
    fn test_load_config_without_llm_section() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            r#"
[catalog]
path = "venues.json"
            "#,
        )
        .unwrap();

        let config = load_llm_config(temp.path()).unwrap();
        assert_eq!(config.provider, "gemini");
    }

    #[test]
    fn test_load_config_disabled() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[llm]\nenabled = false\n").unwrap();

        let config = load_llm_config(temp.path()).unwrap();
        assert!(!config.enabled);
    }

    #[test]
    fn test_get_api_key_unknown_provider() {
        let result = get_api_key("cohere");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown provider"));
    }
}
