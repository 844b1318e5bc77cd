//! Built-in practice levels.

use crate::board::{BoardGrid, CursorPosition};

pub const LEVEL_SIZE: usize = 15;

/// One practice level and the cells the player should draw.
#[derive(Debug, Clone)]
pub struct Level {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    /// Move budget shown to the player
    pub max_moves: u32,
    pub target: BoardGrid,
}

impl Level {
    pub fn columns(&self) -> usize {
        self.target.columns()
    }

    pub fn rows(&self) -> usize {
        self.target.rows()
    }

    /// Percentage of target cells drawn on `board` (0 when there is no target).
    pub fn accuracy(&self, board: &BoardGrid) -> f64 {
        let mut total = 0usize;
        let mut covered = 0usize;
        for y in 0..self.rows() {
            for x in 0..self.columns() {
                let pos = CursorPosition::new(x, y);
                if self.target.is_drawn(pos) {
                    total += 1;
                    if board.is_drawn(pos) {
                        covered += 1;
                    }
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            covered as f64 / total as f64 * 100.0
        }
    }
}

/// Triangle, square and arrow, in play order.
pub fn default_levels() -> Vec<Level> {
    vec![
        Level {
            id: 1,
            title: "Level 1: Triangle",
            description: "Trace the triangle using the headset controls",
            max_moves: 50,
            target: BoardGrid::from_fn(LEVEL_SIZE, LEVEL_SIZE, triangle),
        },
        Level {
            id: 2,
            title: "Level 2: Square",
            description: "Trace the square using the headset controls",
            max_moves: 60,
            target: BoardGrid::from_fn(LEVEL_SIZE, LEVEL_SIZE, square),
        },
        Level {
            id: 3,
            title: "Level 3: Arrow",
            description: "Trace the arrow using the headset controls",
            max_moves: 70,
            target: BoardGrid::from_fn(LEVEL_SIZE, LEVEL_SIZE, arrow),
        },
    ]
}

/// Outline narrowing from an 8-cell base on row 4 to a point on row 12.
fn triangle(x: usize, y: usize) -> bool {
    if !(4..=12).contains(&y) {
        return false;
    }
    let (x, y) = (x as i64, y as i64);
    let width = 12 - y;
    let start = 7 - width / 2;
    let end = start + width;
    (start..=end).contains(&x) && (y == 4 || y == 12 || x == start || x == end)
}

/// 5×5 outline with corners at (5, 5) and (9, 9).
fn square(x: usize, y: usize) -> bool {
    let (top, bottom, left, right) = (5, 9, 5, 9);
    ((left..=right).contains(&x) && (y == top || y == bottom))
        || ((top..=bottom).contains(&y) && (x == left || x == right))
}

/// Shaft along row 7 ending in a widening head.
fn arrow(x: usize, y: usize) -> bool {
    const CENTER: i64 = 7;
    let (x, y) = (x as i64, y as i64);
    if (3..=8).contains(&x) && y == CENTER {
        return true;
    }
    if (9..=11).contains(&x) {
        return (y - CENTER).abs() <= x - 9;
    }
    false
}
