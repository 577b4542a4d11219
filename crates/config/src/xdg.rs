//! XDG Base Directory support for pyedit.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "pyedit";

/// Configuration directory: `$XDG_CONFIG_HOME/pyedit` or `~/.config/pyedit`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Cache directory: `$XDG_CACHE_HOME/pyedit` or `~/.cache/pyedit`.
///
/// The default log file lives here.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}

/// Default log file path.
pub fn default_log_file() -> Result<PathBuf> {
    Ok(get_cache_dir()?.join("pyedit.log"))
}
