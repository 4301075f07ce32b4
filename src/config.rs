use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BASE_URL, SPLIT_RATIO_MAX, SPLIT_RATIO_MIN};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the email assistant backend lives
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means requests wait as long as the backend takes.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Split pane ratio for list vs. preview (30-70, default 40)
    #[serde(default = "default_split_ratio")]
    pub split_ratio: u16,
    /// What to do with an AI result that arrives after the selection moved on
    #[serde(default)]
    pub stale_results: StaleResultPolicy,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keybinding_mode: KeybindingMode::default(),
            theme: ThemeVariant::default(),
            split_ratio: default_split_ratio(),
            stale_results: StaleResultPolicy::default(),
        }
    }
}

impl UiConfig {
    /// Split ratio clamped to the supported range
    pub fn clamped_split_ratio(&self) -> u16 {
        self.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Modern,
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

/// Handling of an action result whose email is no longer selected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StaleResultPolicy {
    /// Drop the result; it belongs to an email the user has left.
    #[default]
    Discard,
    /// Write the result into the panels of whatever is selected now.
    Apply,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_split_ratio() -> u16 {
    40
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailmind");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn ensure_dirs() -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        Ok(())
    }
}
