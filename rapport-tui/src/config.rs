use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RapportConfig {
    /// Base URL of the rapport backend, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for RapportConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl RapportConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("rapport-tui")
            .join("config.toml"))
    }

    pub fn session_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("rapport-tui")
            .join("session"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Load the saved session ID from disk. Returns None if not present.
    pub fn load_session() -> Result<Option<String>> {
        let path = Self::session_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let session = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let session = session.trim().to_string();
        if session.is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }
}
