//! Configuration for fieldmirror.
//!
//! TOML configuration with XDG directory conventions. Missing keys are
//! completed with defaults through serde, so a partial config file stays
//! valid across releases.

mod settings;
mod xdg;

pub use settings::{Config, LoggingSettings, StorageSettings, SurfaceSettings};
pub use xdg::{get_config_dir, get_data_dir};

use std::path::PathBuf;

use anyhow::Result;

/// Default values as constants
pub mod defaults {
    pub const INDENT_UNIT: &str = "  ";
    pub const WORD_WRAP: bool = true;
    pub const SHOW_LINE_NUMBERS: bool = true;
    pub const MIN_HEIGHT: u16 = 16;
    pub const HISTORY_LIMIT: usize = 1000;
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load configuration from file.
    ///
    /// On first run, creates the config file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Parse and validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.surface.indent_unit, "  ");
        assert!(config.surface.word_wrap);
        assert!(config.surface.show_line_numbers);
        assert_eq!(config.surface.min_height, 16);
        assert_eq!(config.logging.min_level, "info");
        assert!(config.storage.state_file.is_none());
    }

    #[test]
    fn test_partial_config_completes_with_defaults() {
        let config = Config::validate_content("[surface]\nword_wrap = false\n").unwrap();
        assert!(!config.surface.word_wrap);
        assert_eq!(config.surface.indent_unit, "  ");
        assert_eq!(config.surface.history_limit, 1000);
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::validate_content(&content).unwrap();
        assert_eq!(parsed.surface.min_height, config.surface.min_height);
    }

    #[test]
    fn test_invalid_content_rejected() {
        assert!(Config::validate_content("surface = 3").is_err());
    }
}
