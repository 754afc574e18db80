use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{matcher::MatchMode, source::SourceLocation};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// source = "https://example.org/weatherData.json"
/// mode = "exact"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// File path or http(s) URL of the weather payload.
    pub source: Option<String>,

    /// Default match mode for searches.
    pub mode: Option<MatchMode>,
}

impl Config {
    /// Configured source, falling back to the bundled file name.
    pub fn source_location(&self) -> SourceLocation {
        self.source
            .as_deref()
            .map(SourceLocation::parse)
            .unwrap_or_default()
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode.unwrap_or_default()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        let source = source.into();
        let source = source.trim();
        self.source = (!source.is_empty()).then(|| source.to_string());
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.mode = Some(mode);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`Config::load`], but an unreadable or invalid file yields the defaults.
    ///
    /// Used by `configure`, which overwrites the file anyway.
    pub fn load_or_default() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(err) => {
                tracing::warn!(error = %err, "no config location, starting from defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!(error = %format!("{err:#}"), "ignoring unusable config file");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citywx", "citywx")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
