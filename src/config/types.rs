//! Configuration type definitions.

use super::enums::StartSurface;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main drawing board geometry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BoardConfig {
    /// Board width in cells (valid range: 5 - 200)
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Board height in cells (valid range: 5 - 200)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Initial cursor column, clamped into the board
    #[serde(default = "default_start_x")]
    pub start_x: usize,

    /// Initial cursor row, clamped into the board
    #[serde(default = "default_start_y")]
    pub start_y: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
            start_x: default_start_x(),
            start_y: default_start_y(),
        }
    }
}

/// Device input handling.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Minimum milliseconds between accepted movement events (valid range: 0 - 5000).
    /// Filters bursts from a noisy signal.
    #[serde(default = "default_move_delay_ms")]
    pub move_delay_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_delay_ms: default_move_delay_ms(),
        }
    }
}

/// Undo/redo history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Snapshots kept per surface (valid range: 1 - 1000)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// On-screen action log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LogConfig {
    /// Number of recent actions kept (valid range: 1 - 500)
    #[serde(default = "default_action_log_capacity")]
    pub action_log_capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            action_log_capacity: default_action_log_capacity(),
        }
    }
}

/// Practice game settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TutorialConfig {
    /// Seconds available per level (valid range: 10 - 3600)
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,

    /// Percentage of target cells that must be drawn to pass a level (valid range: 1 - 100)
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: f64,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit_secs(),
            completion_threshold: default_completion_threshold(),
        }
    }
}

/// Session startup and export.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct SessionConfig {
    /// Surface shown at startup ("tutorial" or "main")
    #[serde(default)]
    pub start_surface: StartSurface,

    /// Directory for saved drawings; defaults to the working directory
    #[serde(default)]
    pub export_directory: Option<String>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_columns() -> usize {
    70
}

fn default_rows() -> usize {
    28
}

fn default_start_x() -> usize {
    37
}

fn default_start_y() -> usize {
    25
}

fn default_move_delay_ms() -> u64 {
    200
}

fn default_max_entries() -> usize {
    crate::history::DEFAULT_MAX_ENTRIES
}

fn default_action_log_capacity() -> usize {
    crate::input::action_log::DEFAULT_CAPACITY
}

fn default_time_limit_secs() -> u64 {
    300
}

fn default_completion_threshold() -> f64 {
    85.0
}
