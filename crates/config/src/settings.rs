//! Configuration structures for fieldmirror settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Editing surface settings
    #[serde(default)]
    pub surface: SurfaceSettings,

    /// Persisted state settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Editing surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSettings {
    /// Text inserted by the indent key
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,

    /// Soft-wrap long lines
    #[serde(default = "default_word_wrap")]
    pub word_wrap: bool,

    /// Show the line-number gutter
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Minimum surface height in rows
    #[serde(default = "default_min_height")]
    pub min_height: u16,

    /// Undo history capacity
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// Persisted state settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// State file path override (defaults to the data directory)
    #[serde(default)]
    pub state_file: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional; defaults to the data directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_indent_unit() -> String {
    defaults::INDENT_UNIT.to_string()
}

fn default_word_wrap() -> bool {
    defaults::WORD_WRAP
}

fn default_show_line_numbers() -> bool {
    defaults::SHOW_LINE_NUMBERS
}

fn default_min_height() -> u16 {
    defaults::MIN_HEIGHT
}

fn default_history_limit() -> usize {
    defaults::HISTORY_LIMIT
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            indent_unit: default_indent_unit(),
            word_wrap: default_word_wrap(),
            show_line_numbers: default_show_line_numbers(),
            min_height: default_min_height(),
            history_limit: default_history_limit(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
