//! Settings file: API connection and import configuration.
//!
//! Stored as TOML in the platform config directory, e.g.
//! `~/.config/mpdx-import/settings.toml` on Linux.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mpdx_client::ApiSettings;
use mpdx_model::ImportConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "settings.toml";

/// Environment variable that overrides `api.token`.
pub const TOKEN_ENV: &str = "MPDX_API_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    /// Supported headers, required headers and constants. Defaults to MPDX's.
    pub import: ImportConfig,
}

impl Settings {
    /// Default settings file location.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "MPDX", "mpdx-import")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let settings = toml::from_str(&content)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Write settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Settings from `path` (or the default location) with the token taken
    /// from the environment when set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load_from(&Self::config_path())?,
        };
        Ok(settings.with_env_token(std::env::var(TOKEN_ENV).ok()))
    }

    #[must_use]
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }
}
