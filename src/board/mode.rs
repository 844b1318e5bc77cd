//! Drawing mode selection and direction resolution.

use serde::{Deserialize, Serialize};

/// Axis or diagonal the cursor is constrained to.
///
/// The device selects a mode with an `S` frame carrying the mode code,
/// then drives the cursor with direction codes laid out like a numeric
/// keypad. Only two of the eight directions are meaningful per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawingMode {
    /// Left/right along a row (code 0)
    #[default]
    Horizontal,
    /// Up/down along a column (code 1)
    Vertical,
    /// Top-left to bottom-right diagonal (code 2)
    DiagonalNwSe,
    /// Top-right to bottom-left diagonal (code 3)
    DiagonalNeSw,
}

impl DrawingMode {
    pub const ALL: [DrawingMode; 4] = [
        DrawingMode::Horizontal,
        DrawingMode::Vertical,
        DrawingMode::DiagonalNwSe,
        DrawingMode::DiagonalNeSw,
    ];

    /// Maps a device mode code (0-3) to a mode. Anything else is rejected.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
            Self::DiagonalNwSe => 2,
            Self::DiagonalNeSw => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::DiagonalNwSe => "Diagonal NW-SE",
            Self::DiagonalNeSw => "Diagonal NE-SW",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Horizontal => '↔',
            Self::Vertical => '↕',
            Self::DiagonalNwSe => '↖',
            Self::DiagonalNeSw => '↗',
        }
    }

    /// Returns the `(dx, dy)` step for a direction code, or `None` when the
    /// direction has no meaning in this mode.
    ///
    /// Direction codes: 9 = left/up, 8 = right/down, 5 = NW, 3 = SE,
    /// 4 = NE, 2 = SW. The y axis grows downwards.
    pub fn step(self, direction: u8) -> Option<(i64, i64)> {
        match (self, direction) {
            (Self::Horizontal, 9) => Some((-1, 0)),
            (Self::Horizontal, 8) => Some((1, 0)),
            (Self::Vertical, 9) => Some((0, -1)),
            (Self::Vertical, 8) => Some((0, 1)),
            (Self::DiagonalNwSe, 5) => Some((-1, -1)),
            (Self::DiagonalNwSe, 3) => Some((1, 1)),
            (Self::DiagonalNeSw, 4) => Some((1, -1)),
            (Self::DiagonalNeSw, 2) => Some((-1, 1)),
            _ => None,
        }
    }
}

impl std::str::FromStr for DrawingMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "diagonal-nw-se" | "nw-se" => Ok(Self::DiagonalNwSe),
            "diagonal-ne-sw" | "ne-sw" => Ok(Self::DiagonalNeSw),
            _ => Err(()),
        }
    }
}
