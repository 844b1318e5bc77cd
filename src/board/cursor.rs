//! Cursor coordinates.

use serde::{Deserialize, Serialize};

/// Cell coordinate on a board, always within `[0, columns) × [0, rows)`
/// of the surface that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: usize,
    pub y: usize,
}

impl CursorPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Clamps a position into a `columns × rows` board.
    pub fn clamped(x: usize, y: usize, columns: usize, rows: usize) -> Self {
        Self {
            x: x.min(columns.saturating_sub(1)),
            y: y.min(rows.saturating_sub(1)),
        }
    }

    /// Applies a step, clamping each axis to the board edges.
    pub fn offset_clamped(self, dx: i64, dy: i64, columns: usize, rows: usize) -> Self {
        let clamp_axis = |value: usize, delta: i64, len: usize| -> usize {
            let max = len.saturating_sub(1) as i64;
            (value as i64 + delta).clamp(0, max) as usize
        };
        Self {
            x: clamp_axis(self.x, dx, columns),
            y: clamp_axis(self.y, dy, rows),
        }
    }
}

impl std::fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_clamps_at_edges() {
        let origin = CursorPosition::new(0, 0);
        assert_eq!(origin.offset_clamped(-1, -1, 10, 10), origin);

        let corner = CursorPosition::new(9, 9);
        assert_eq!(corner.offset_clamped(1, 1, 10, 10), corner);

        // Diagonal against one wall only moves along the free axis
        let left_edge = CursorPosition::new(0, 5);
        assert_eq!(
            left_edge.offset_clamped(-1, 1, 10, 10),
            CursorPosition::new(0, 6)
        );
    }

    #[test]
    fn clamped_pulls_start_position_inside() {
        assert_eq!(
            CursorPosition::clamped(37, 25, 15, 15),
            CursorPosition::new(14, 14)
        );
    }
}
