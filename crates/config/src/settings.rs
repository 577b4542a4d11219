//! Configuration structures for pyedit settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor composition settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Encoding detection settings
    #[serde(default)]
    pub encoding: EncodingSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Palette name (dark, light, or a file in the themes directory)
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

/// Settings consumed when composing the Python editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Indentation width used by the indenter mode
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Column of the right margin guide
    #[serde(default = "default_right_margin")]
    pub right_margin: usize,

    /// Maximum line length reported by the PEP 8 checker
    #[serde(default = "default_pep8_max_line_length")]
    pub pep8_max_line_length: usize,

    /// Editor window title
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

/// Encoding detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Encoding returned when no declaration is found
    #[serde(default = "default_fallback_encoding")]
    pub fallback: String,

    /// Scan mode (whole-file, pep263)
    #[serde(default = "default_scan_mode")]
    pub scan: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_right_margin() -> usize {
    defaults::RIGHT_MARGIN
}

fn default_pep8_max_line_length() -> usize {
    defaults::PEP8_MAX_LINE_LENGTH
}

fn default_window_title() -> String {
    defaults::WINDOW_TITLE.to_string()
}

fn default_fallback_encoding() -> String {
    defaults::FALLBACK_ENCODING.to_string()
}

fn default_scan_mode() -> String {
    defaults::SCAN_MODE.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            right_margin: default_right_margin(),
            pep8_max_line_length: default_pep8_max_line_length(),
            window_title: default_window_title(),
        }
    }
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            fallback: default_fallback_encoding(),
            scan: default_scan_mode(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
