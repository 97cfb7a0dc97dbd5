//! Lookup configuration loaded from `~/.config/lodestone-jobs/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Placeholder replaced by the percent-encoded character id.
pub const ID_PLACEHOLDER: &str = "{id}";

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://na.finalfantasyxiv.com/lodestone/character/{id}/class_job/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; lodestone-jobs/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Settings for the upstream fetch.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfig {
    /// Upstream URL with an `{id}` placeholder.
    pub url_template: String,
    /// Total request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent upstream.
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl LookupConfig {
    /// Load from the default config path, falling back to defaults if the
    /// file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Parse and validate TOML config text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url_template.contains(ID_PLACEHOLDER) {
            anyhow::bail!(
                "url_template must contain {}: {}",
                ID_PLACEHOLDER,
                self.url_template
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lodestone-jobs")
        .join("config.toml")
}
