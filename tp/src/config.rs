//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file name
const LOCAL_CONFIG: &str = ".tripplanner.yml";

/// Main trip planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation provider configuration
    pub llm: LlmConfig,

    /// Web-search provider configuration
    pub search: SearchConfig,

    /// Session behavior
    pub planner: PlannerConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); --log-level wins over this
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that both API key environment variables are set so a session
    /// does not discover a missing key halfway through planning.
    pub fn validate(&self) -> Result<()> {
        let llm = self.llm.resolve()?;
        if std::env::var(&llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                llm.api_key_env
            ));
        }

        let search = self.search.resolve()?;
        if std::env::var(&search.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Search API key not found. Set the {} environment variable.",
                search.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    ///
    /// 1. Explicit `--config` path (errors are fatal)
    /// 2. `./.tripplanner.yml`
    /// 3. `~/.config/tripplanner/tripplanner.yml`
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::default_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Swallows every error: a broken config file is reported properly by
    /// [`Config::load`] once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };

        paths
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tripplanner").join("tripplanner.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Text-generation provider configuration
///
/// `api-key-env` and `base-url` default per provider when left unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// HTTP-level retries for transient statuses (0 = never retry)
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: None,
            base_url: None,
            max_tokens: 8192,
            timeout_ms: 120_000,
            max_retries: 0,
        }
    }
}

impl LlmConfig {
    /// Fill provider defaults and check the provider name
    pub fn resolve(&self) -> Result<ResolvedLlmConfig> {
        let (default_env, default_url) = match self.provider.as_str() {
            "gemini" => ("GOOGLE_API_KEY", "https://generativelanguage.googleapis.com"),
            "openai" => ("OPENAI_API_KEY", "https://api.openai.com"),
            other => {
                return Err(eyre::eyre!(
                    "Unknown LLM provider: '{}'. Supported: gemini, openai",
                    other
                ));
            }
        };

        Ok(ResolvedLlmConfig {
            provider: self.provider.clone(),
            model: self.model.clone(),
            api_key_env: self.api_key_env.clone().unwrap_or_else(|| default_env.to_string()),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| default_url.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
            max_retries: self.max_retries,
        })
    }
}

/// LLM configuration with every provider default filled in
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

impl ResolvedLlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| eyre::eyre!("{} environment variable not set", self.api_key_env))
    }
}

/// Web-search provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider name ("tavily" or "brave")
    pub provider: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Number of results embedded in the suggestion prompt
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Characters of each result's content embedded in the prompt
    #[serde(rename = "content-chars")]
    pub content_chars: usize,

    /// Tavily search depth ("basic" or "advanced")
    #[serde(rename = "search-depth")]
    pub search_depth: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: "tavily".to_string(),
            api_key_env: None,
            base_url: None,
            max_results: 5,
            content_chars: 500,
            search_depth: "advanced".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl SearchConfig {
    /// Fill provider defaults and check the provider name
    pub fn resolve(&self) -> Result<ResolvedSearchConfig> {
        let (default_env, default_url) = match self.provider.as_str() {
            "tavily" => ("TAVILY_API_KEY", "https://api.tavily.com"),
            "brave" => ("BRAVE_API_KEY", "https://api.search.brave.com"),
            other => {
                return Err(eyre::eyre!(
                    "Unknown search provider: '{}'. Supported: tavily, brave",
                    other
                ));
            }
        };

        Ok(ResolvedSearchConfig {
            provider: self.provider.clone(),
            api_key_env: self.api_key_env.clone().unwrap_or_else(|| default_env.to_string()),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| default_url.to_string())
                .trim_end_matches('/')
                .to_string(),
            search_depth: self.search_depth.clone(),
            timeout_ms: self.timeout_ms,
        })
    }
}

/// Search configuration with every provider default filled in
#[derive(Debug, Clone)]
pub struct ResolvedSearchConfig {
    pub provider: String,
    pub api_key_env: String,
    pub base_url: String,
    pub search_depth: String,
    pub timeout_ms: u64,
}

impl ResolvedSearchConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| eyre::eyre!("{} environment variable not set", self.api_key_env))
    }
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Words that move preference refinement on to suggestions (case-insensitive substring match)
    #[serde(rename = "advance-keywords")]
    pub advance_keywords: Vec<String>,

    /// Reuse the response for an identical prompt within a session
    #[serde(rename = "cache-prompts")]
    pub cache_prompts: bool,

    /// Recent turns included when revising suggestions
    #[serde(rename = "revision-context-turns")]
    pub revision_context_turns: usize,

    /// Directory itineraries are exported to
    #[serde(rename = "export-dir")]
    pub export_dir: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            advance_keywords: vec!["suggestions".to_string(), "next".to_string(), "activities".to_string()],
            cache_prompts: false,
            revision_context_turns: 4,
            export_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.max_retries, 0);
        assert_eq!(config.search.provider, "tavily");
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.content_chars, 500);
        assert!(!config.planner.cache_prompts);
        assert_eq!(config.planner.advance_keywords, vec!["suggestions", "next", "activities"]);
    }

    #[test]
    fn test_resolve_provider_defaults() {
        let resolved = LlmConfig::default().resolve().unwrap();
        assert_eq!(resolved.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(resolved.base_url, "https://generativelanguage.googleapis.com");

        let openai = LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            base_url: Some("https://proxy.example.com/".to_string()),
            ..Default::default()
        };
        let resolved = openai.resolve().unwrap();
        assert_eq!(resolved.api_key_env, "OPENAI_API_KEY");
        assert_eq!(resolved.base_url, "https://proxy.example.com");

        let search = SearchConfig::default().resolve().unwrap();
        assert_eq!(search.api_key_env, "TAVILY_API_KEY");
        assert_eq!(search.base_url, "https://api.tavily.com");
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            ..Default::default()
        };
        assert!(config.resolve().is_err());

        let config = SearchConfig {
            provider: "altavista".to_string(),
            ..Default::default()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4o-mini
  api-key-env: MY_OPENAI_KEY
  max-tokens: 2048
  timeout-ms: 60000
  max-retries: 2

search:
  provider: brave
  max-results: 3
  content-chars: 200

planner:
  advance-keywords: [go, ready]
  cache-prompts: true
  revision-context-turns: 6
  export-dir: /tmp/trips

log-level: debug
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env.as_deref(), Some("MY_OPENAI_KEY"));
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.llm.max_retries, 2);
        assert_eq!(config.search.provider, "brave");
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.content_chars, 200);
        assert_eq!(config.planner.advance_keywords, vec!["go", "ready"]);
        assert!(config.planner.cache_prompts);
        assert_eq!(config.planner.revision_context_turns, 6);
        assert_eq!(config.planner.export_dir, PathBuf::from("/tmp/trips"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-1.5-pro
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-1.5-pro");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.search.search_depth, "advanced");
        assert_eq!(config.planner.revision_context_turns, 4);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trip.yml");
        fs::write(&path, "planner:\n  cache-prompts: true\nlog-level: WARN\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.planner.cache_prompts);
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    #[serial]
    fn test_validate_requires_api_keys() {
        let config = Config {
            llm: LlmConfig {
                api_key_env: Some("TP_TEST_LLM_KEY".to_string()),
                ..Default::default()
            },
            search: SearchConfig {
                api_key_env: Some("TP_TEST_SEARCH_KEY".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        // SAFETY: test is serialized; no other thread reads these variables
        unsafe {
            std::env::remove_var("TP_TEST_LLM_KEY");
            std::env::remove_var("TP_TEST_SEARCH_KEY");
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TP_TEST_LLM_KEY"));

        unsafe {
            std::env::set_var("TP_TEST_LLM_KEY", "llm-key");
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TP_TEST_SEARCH_KEY"));

        unsafe {
            std::env::set_var("TP_TEST_SEARCH_KEY", "search-key");
        }
        assert!(config.validate().is_ok());

        unsafe {
            std::env::remove_var("TP_TEST_LLM_KEY");
            std::env::remove_var("TP_TEST_SEARCH_KEY");
        }
    }
}
