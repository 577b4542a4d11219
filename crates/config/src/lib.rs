//! Configuration management for pyedit.
//!
//! This crate provides configuration loading and saving in TOML format
//! following XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, EncodingSettings, GeneralSettings, LoggingSettings};
pub use xdg::{default_log_file, get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "dark";
    pub const TAB_SIZE: usize = 4;
    pub const RIGHT_MARGIN: usize = 79;
    pub const PEP8_MAX_LINE_LENGTH: usize = 79;
    pub const WINDOW_TITLE: &str = "pyedit - Python Editor";
    pub const FALLBACK_ENCODING: &str = "utf-8";
    pub const SCAN_MODE: &str = "whole-file";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        let existed = config_path.exists();
        let config = Self::load_from(&config_path)?;

        if !existed {
            Self::ensure_themes_dir()?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is created with default values. Missing keys are
    /// auto-completed and written back.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&original_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn get_themes_dir() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes"))
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// Ensure themes directory exists.
    fn ensure_themes_dir() -> Result<()> {
        let themes_dir = Self::get_themes_dir()?;
        if !themes_dir.exists() {
            std::fs::create_dir_all(themes_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.general.theme, "dark");
        assert_eq!(config.editor.right_margin, 79);
        assert_eq!(config.editor.window_title, defaults::WINDOW_TITLE);
        assert_eq!(config.encoding.fallback, "utf-8");
        assert_eq!(config.encoding.scan, "whole-file");
        assert!(config.logging.file_path.is_none());
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.tab_size, defaults::TAB_SIZE);
        assert!(path.exists());
    }

    #[test]
    fn test_missing_keys_are_completed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ntheme = \"light\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.theme, "light");
        assert_eq!(config.encoding.scan, "whole-file");

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("[encoding]"));
        assert!(rewritten.contains("window_title"));
    }

    #[test]
    fn test_validate_content_rejects_bad_toml() {
        assert!(Config::validate_content("[editor]\ntab_size = \"four\"").is_err());
        assert!(Config::validate_content("[encoding]\nscan = \"pep263\"").is_ok());
    }
}
