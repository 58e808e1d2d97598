//! Service configuration
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (PRIZEDESK_*) (highest)
//! 2. Config file (`--config`, `./prizedesk.toml`, or `~/.config/prizedesk/config.toml`)
//! 3. Default values (lowest)
//!
//! Legacy variable names from the original hosted deployment are honored as
//! fallbacks: `ANTHROPIC_API_KEY`, `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`.
//!
//! Credentials are optional at load time. Each handler group checks its own
//! requirements per request, so a deployment with only the store configured
//! still serves `/api/data`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default completion endpoint base URL
pub const DEFAULT_LLM_API_BASE: &str = "https://developer.osv.engineering/inference/v1";

/// Default completion model
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4-5-20250929";

/// Default max_tokens for completion requests
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default record store base URL (Airtable REST API)
pub const DEFAULT_STORE_API_BASE: &str = "https://api.airtable.com/v0";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to listen on
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8868
}

/// Upstream completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL
    #[serde(default = "default_llm_api_base")]
    pub api_base: String,

    /// Bearer credential; required to serve `/api/ai`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for the completion response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_llm_api_base(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl LlmConfig {
    /// Get the API key, failing with the variable name when unset
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::Config("PRIZEDESK_LLM_API_KEY (or ANTHROPIC_API_KEY) is not set".to_string())
        })
    }
}

fn default_llm_api_base() -> String {
    DEFAULT_LLM_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Record store (Airtable) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store REST API base URL
    #[serde(default = "default_store_api_base")]
    pub api_base: String,

    /// Store API credential; required to serve `/api/data`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Workspace/base identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,

    /// Table holding Award records
    #[serde(default = "default_awards_table")]
    pub awards_table: String,

    /// Table holding Requirement records
    #[serde(default = "default_requirements_table")]
    pub requirements_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: default_store_api_base(),
            api_key: None,
            base_id: None,
            awards_table: default_awards_table(),
            requirements_table: default_requirements_table(),
        }
    }
}

impl StoreConfig {
    /// Get the API key, failing with the variable name when unset
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::Config("PRIZEDESK_AIRTABLE_API_KEY (or AIRTABLE_API_KEY) is not set".to_string())
        })
    }

    /// Get the base identifier, failing with the variable name when unset
    pub fn require_base_id(&self) -> Result<&str> {
        self.base_id.as_deref().ok_or_else(|| {
            Error::Config("PRIZEDESK_AIRTABLE_BASE_ID (or AIRTABLE_BASE_ID) is not set".to_string())
        })
    }
}

fn default_store_api_base() -> String {
    DEFAULT_STORE_API_BASE.to_string()
}

fn default_awards_table() -> String {
    "Awards".to_string()
}

fn default_requirements_table() -> String {
    "Requirements".to_string()
}

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream completion endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration: file (explicit path or default locations) then
    /// environment variable overrides.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match config_path.map(PathBuf::from).or_else(default_config_path) {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("failed to read config file {}: {}", path.display(), e)
                })?;
                toml::from_str(&content).map_err(|e| {
                    anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e)
                })?
            }
            None => AppConfig::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Overlay environment variables on top of file/default values
    fn apply_env(&mut self) {
        if let Some(host) = env_var("PRIZEDESK_HOST", None) {
            self.server.host = host;
        }
        if let Some(port) = env_var("PRIZEDESK_PORT", None).and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        if let Some(base) = env_var("PRIZEDESK_LLM_API_BASE", None) {
            self.llm.api_base = base;
        }
        if let Some(key) = env_var("PRIZEDESK_LLM_API_KEY", Some("ANTHROPIC_API_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = env_var("PRIZEDESK_LLM_MODEL", None) {
            self.llm.model = model;
        }
        if let Some(max) = env_var("PRIZEDESK_LLM_MAX_TOKENS", None).and_then(|v| v.parse().ok()) {
            self.llm.max_tokens = max;
        }

        if let Some(base) = env_var("PRIZEDESK_AIRTABLE_API_BASE", None) {
            self.store.api_base = base;
        }
        if let Some(key) = env_var("PRIZEDESK_AIRTABLE_API_KEY", Some("AIRTABLE_API_KEY")) {
            self.store.api_key = Some(key);
        }
        if let Some(base_id) = env_var("PRIZEDESK_AIRTABLE_BASE_ID", Some("AIRTABLE_BASE_ID")) {
            self.store.base_id = Some(base_id);
        }
    }
}

/// Read an environment variable, falling back to a legacy name. A set but
/// empty variable counts as unset.
fn env_var(primary: &str, legacy: Option<&str>) -> Option<String> {
    let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    read(primary).or_else(|| legacy.and_then(read))
}

/// Default config file locations: `./prizedesk.toml`, then
/// `~/.config/prizedesk/config.toml`. Returns None when neither exists.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("./prizedesk.toml");
    if local.exists() {
        return Some(local);
    }
    let home = dirs::config_dir()?.join("prizedesk/config.toml");
    if home.exists() {
        Some(home)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8868);
        assert_eq!(config.llm.api_base, DEFAULT_LLM_API_BASE);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.store.awards_table, "Awards");
        assert_eq!(config.store.requirements_table, "Requirements");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [store]
            api_key = "key-abc"
            base_id = "appXYZ"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.store.api_key.as_deref(), Some("key-abc"));
        assert_eq!(config.store.base_id.as_deref(), Some("appXYZ"));
        // Untouched sections keep their defaults
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_require_api_key_names_the_variable() {
        let config = LlmConfig::default();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("PRIZEDESK_LLM_API_KEY"));

        let store = StoreConfig::default();
        let err = store.require_api_key().unwrap_err();
        assert!(err.to_string().contains("PRIZEDESK_AIRTABLE_API_KEY"));
        let err = store.require_base_id().unwrap_err();
        assert!(err.to_string().contains("PRIZEDESK_AIRTABLE_BASE_ID"));
    }

    // Environment overlay tests share process-global state; serialize them.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for (name, value) in vars {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
        f();
        for (name, _) in vars {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_env_primary_wins_over_legacy() {
        with_env(
            &[
                ("PRIZEDESK_LLM_API_KEY", Some("primary-key")),
                ("ANTHROPIC_API_KEY", Some("legacy-key")),
            ],
            || {
                let mut config = AppConfig::default();
                config.apply_env();
                assert_eq!(config.llm.api_key.as_deref(), Some("primary-key"));
            },
        );
    }

    #[test]
    fn test_env_legacy_fallbacks() {
        with_env(
            &[
                ("PRIZEDESK_LLM_API_KEY", None),
                ("ANTHROPIC_API_KEY", Some("legacy-llm")),
                ("PRIZEDESK_AIRTABLE_API_KEY", None),
                ("AIRTABLE_API_KEY", Some("legacy-store")),
                ("PRIZEDESK_AIRTABLE_BASE_ID", None),
                ("AIRTABLE_BASE_ID", Some("appLEGACY")),
            ],
            || {
                let mut config = AppConfig::default();
                config.apply_env();
                assert_eq!(config.llm.api_key.as_deref(), Some("legacy-llm"));
                assert_eq!(config.store.api_key.as_deref(), Some("legacy-store"));
                assert_eq!(config.store.base_id.as_deref(), Some("appLEGACY"));
            },
        );
    }

    #[test]
    fn test_env_overrides_file_value() {
        with_env(
            &[("PRIZEDESK_AIRTABLE_API_KEY", Some("env-key"))],
            || {
                let mut config: AppConfig = toml::from_str(
                    r#"
                    [store]
                    api_key = "file-key"
                    base_id = "appFILE"
                    "#,
                )
                .unwrap();
                config.apply_env();
                assert_eq!(config.store.api_key.as_deref(), Some("env-key"));
                // Values the environment does not name keep the file value
                assert_eq!(config.store.base_id.as_deref(), Some("appFILE"));
            },
        );
    }

    #[test]
    fn test_env_empty_value_is_ignored() {
        with_env(
            &[
                ("PRIZEDESK_LLM_MODEL", Some("")),
                ("PRIZEDESK_LLM_API_KEY", Some("")),
                ("ANTHROPIC_API_KEY", Some("fallback-key")),
            ],
            || {
                let mut config = AppConfig::default();
                config.apply_env();
                assert_eq!(config.llm.model, DEFAULT_MODEL);
                // An empty primary falls through to the legacy name
                assert_eq!(config.llm.api_key.as_deref(), Some("fallback-key"));
            },
        );
    }

    #[test]
    fn test_api_keys_not_serialized() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("secret".to_string());
        config.store.api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
