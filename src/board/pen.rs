//! Pen/eraser state.

use serde::{Deserialize, Serialize};

/// Whether cursor movement also mutates the board.
///
/// The device never sends an explicit pen state; every toggle frame
/// advances the cycle Disabled → Pen → Eraser → Disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenState {
    /// Movement only (code 0)
    #[default]
    Disabled,
    /// Movement draws the destination cell (code 1)
    Pen,
    /// Movement erases the destination cell (code 2)
    Eraser,
}

impl PenState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Disabled),
            1 => Some(Self::Pen),
            2 => Some(Self::Eraser),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Pen => 1,
            Self::Eraser => 2,
        }
    }

    /// Next state in the three-step cycle, `(code + 1) mod 3`.
    pub fn next(self) -> Self {
        match self {
            Self::Disabled => Self::Pen,
            Self::Pen => Self::Eraser,
            Self::Eraser => Self::Disabled,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
        }
    }
}
