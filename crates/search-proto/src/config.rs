use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "NCO_SEARCH_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where and how the search endpoint is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the search service; `/search` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound on a single request. A timed-out search counts as failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional ranking knobs. Sent only when set.
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub bm25_weight: Option<f32>,
    #[serde(default)]
    pub vector_weight: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            top_k: None,
            bm25_weight: None,
            vector_weight: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_keys_bar: default_show_keys_bar(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_show_keys_bar() -> bool {
    true
}

impl Config {
    /// Load `config.toml` from the platform config dir, falling back to
    /// defaults when the file is absent, then apply env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.apply_base_url_override(&url);
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    fn apply_base_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api.base_url = url.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.api.top_k.is_none());
        assert!(config.ui.show_keys_bar);
        assert!(Config::config_path().ends_with("nco-search/config.toml"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            top_k = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.top_k, Some(5));
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.ui.show_keys_bar);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_base_url_override_ignores_blank() {
        let mut config = Config::default();
        config.apply_base_url_override("   ");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        config.apply_base_url_override(" http://search.internal:9000 ");
        assert_eq!(config.api.base_url, "http://search.internal:9000");
    }
}
