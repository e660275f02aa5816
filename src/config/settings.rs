//! Application configuration file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Per-monitor settings
    #[serde(default)]
    pub monitors: Vec<MonitorEntry>,
}

fn default_version() -> u32 {
    1
}

/// Saved settings for one monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorEntry {
    /// Registered monitor id, e.g. "cpu"
    pub id: String,
    /// Update interval in tenths of a second
    #[serde(default)]
    pub rate: Option<u64>,
    /// Monitor options, applied before any given on the command line
    #[serde(default)]
    pub args: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; the default configuration is used.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "barmon", "barmon")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Settings for a monitor id, if configured
    pub fn entry(&self, id: &str) -> Option<&MonitorEntry> {
        self.monitors.iter().find(|entry| entry.id == id)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            monitors: Vec::new(),
        }
    }
}
