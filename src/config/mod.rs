//! Configuration file support for neuroscribe.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/neuroscribe/config.toml`. Settings include the board size,
//! movement debounce, history depth, and practice game tuning.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::StartSurface;
pub use types::{
    BoardConfig, HistoryConfig, InputConfig, LogConfig, SessionConfig, TutorialConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [board]
/// columns = 70
/// rows = 28
///
/// [input]
/// move_delay_ms = 200
///
/// [history]
/// max_entries = 100
///
/// [tutorial]
/// time_limit_secs = 300
/// completion_threshold = 85.0
///
/// [session]
/// start_surface = "main"
/// export_directory = "~/Pictures/neuroart"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing board geometry
    #[serde(default)]
    pub board: BoardConfig,

    /// Device input handling
    #[serde(default)]
    pub input: InputConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Action log size
    #[serde(default)]
    pub log: LogConfig,

    /// Practice game tuning
    #[serde(default)]
    pub tutorial: TutorialConfig,

    /// Startup surface and export location
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `board.columns` / `board.rows`: 5 - 200
    /// - `board.start_x` / `board.start_y`: inside the board
    /// - `input.move_delay_ms`: 0 - 5000
    /// - `history.max_entries`: 1 - 1000
    /// - `log.action_log_capacity`: 1 - 500
    /// - `tutorial.time_limit_secs`: 10 - 3600
    /// - `tutorial.completion_threshold`: 1.0 - 100.0
    fn validate_and_clamp(&mut self) {
        if !(5..=200).contains(&self.board.columns) {
            log::warn!(
                "Invalid board columns {}, clamping to 5-200 range",
                self.board.columns
            );
            self.board.columns = self.board.columns.clamp(5, 200);
        }

        if !(5..=200).contains(&self.board.rows) {
            log::warn!(
                "Invalid board rows {}, clamping to 5-200 range",
                self.board.rows
            );
            self.board.rows = self.board.rows.clamp(5, 200);
        }

        if self.board.start_x >= self.board.columns {
            log::warn!(
                "Start column {} is off the board, clamping to {}",
                self.board.start_x,
                self.board.columns - 1
            );
            self.board.start_x = self.board.columns - 1;
        }

        if self.board.start_y >= self.board.rows {
            log::warn!(
                "Start row {} is off the board, clamping to {}",
                self.board.start_y,
                self.board.rows - 1
            );
            self.board.start_y = self.board.rows - 1;
        }

        if self.input.move_delay_ms > 5000 {
            log::warn!(
                "Invalid move_delay_ms {}, clamping to 0-5000 range",
                self.input.move_delay_ms
            );
            self.input.move_delay_ms = 5000;
        }

        if !(1..=1000).contains(&self.history.max_entries) {
            log::warn!(
                "Invalid history max_entries {}, clamping to 1-1000 range",
                self.history.max_entries
            );
            self.history.max_entries = self.history.max_entries.clamp(1, 1000);
        }

        if !(1..=500).contains(&self.log.action_log_capacity) {
            log::warn!(
                "Invalid action_log_capacity {}, clamping to 1-500 range",
                self.log.action_log_capacity
            );
            self.log.action_log_capacity = self.log.action_log_capacity.clamp(1, 500);
        }

        if !(10..=3600).contains(&self.tutorial.time_limit_secs) {
            log::warn!(
                "Invalid tutorial time_limit_secs {}, clamping to 10-3600 range",
                self.tutorial.time_limit_secs
            );
            self.tutorial.time_limit_secs = self.tutorial.time_limit_secs.clamp(10, 3600);
        }

        if !(1.0..=100.0).contains(&self.tutorial.completion_threshold) {
            log::warn!(
                "Invalid completion_threshold {:.1}, clamping to 1.0-100.0 range",
                self.tutorial.completion_threshold
            );
            // NaN falls through clamp unchanged
            self.tutorial.completion_threshold = if self.tutorial.completion_threshold.is_nan() {
                85.0
            } else {
                self.tutorial.completion_threshold.clamp(1.0, 100.0)
            };
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/neuroscribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("neuroscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates configuration text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Directory where "Save Drawing" writes files.
    pub fn export_directory(&self) -> PathBuf {
        self.session
            .export_directory
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
