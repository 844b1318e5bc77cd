use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{BoardGrid, CursorPosition, DrawingMode, PenState};
use crate::input::InteractionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCursor {
    pub x: usize,
    pub y: usize,
}

impl From<CursorPosition> for ExportCursor {
    fn from(pos: CursorPosition) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

/// On-disk form of a drawing.
///
/// `grid` is row-major (`grid[y][x]`); `mode` and `pen_state` hold the
/// numeric codes the device uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub grid: Vec<Vec<bool>>,
    pub cursor: ExportCursor,
    pub mode: u8,
    pub pen_state: u8,
    pub timestamp: DateTime<Utc>,
}

impl ExportSnapshot {
    pub fn from_state(state: &InteractionState) -> Self {
        Self {
            grid: state.board().to_rows(),
            cursor: state.cursor().into(),
            mode: state.mode().code(),
            pen_state: state.pen().code(),
            timestamp: Utc::now(),
        }
    }

    pub fn drawing_mode(&self) -> Option<DrawingMode> {
        DrawingMode::from_code(self.mode)
    }

    pub fn pen(&self) -> Option<PenState> {
        PenState::from_code(self.pen_state)
    }

    /// Rebuilds the board; ragged rows are padded with empty cells.
    pub fn board(&self) -> BoardGrid {
        let columns = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        BoardGrid::from_fn(columns, self.grid.len(), |x, y| {
            self.grid[y].get(x).copied().unwrap_or(false)
        })
    }
}
