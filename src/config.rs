use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub civitai: CivitaiConfig,

    pub prompts: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/lorarr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CivitaiConfig {
    /// REST API base for structured model payloads.
    pub api_base: String,

    /// Public model page base, used for links and for the HTML fallback.
    pub page_base: String,

    /// Image CDN base prepended to version image names.
    pub image_base: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,

    /// Whether to fetch the model page for base-model evidence when the
    /// structured payload carries none.
    pub html_fallback: bool,
}

impl Default for CivitaiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://civitai.com/api/v1".to_string(),
            page_base: "https://civitai.com/models".to_string(),
            image_base: "https://image.civitai.com/xG1nkqKTMzGDvpLrXFTSTA".to_string(),
            request_timeout_seconds: 30,
            html_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// How many generated prompts to keep in history (default: 20)
    pub history_limit: u64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { history_limit: 20 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("lorarr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".lorarr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (label, base) in [
            ("civitai.api_base", &self.civitai.api_base),
            ("civitai.page_base", &self.civitai.page_base),
            ("civitai.image_base", &self.civitai.image_base),
        ] {
            url::Url::parse(base).with_context(|| format!("Invalid URL in {label}: {base}"))?;
        }

        if self.civitai.request_timeout_seconds == 0 {
            anyhow::bail!("Civitai request timeout must be > 0");
        }

        if self.prompts.history_limit == 0 {
            anyhow::bail!("Prompt history limit must be > 0");
        }

        Ok(())
    }
}
