//! XDG Base Directory support for fieldmirror.

use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_NAME: &str = "fieldmirror";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/fieldmirror` or `~/.config/fieldmirror`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the data directory following XDG conventions.
///
/// Returns `$XDG_DATA_HOME/fieldmirror` or `~/.local/share/fieldmirror`.
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine data directory")
}
