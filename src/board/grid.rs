//! Boolean cell grid backing a drawing surface.

use super::CursorPosition;

/// Row-major matrix of drawn cells (`true` = drawn).
///
/// Clones are deep copies, so a snapshot taken for history never sees
/// later edits to the live grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGrid {
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl BoardGrid {
    /// Creates an empty `columns × rows` grid.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![false; columns * rows],
        }
    }

    /// Builds a grid from a predicate evaluated for every `(x, y)`.
    pub fn from_fn(columns: usize, rows: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(columns, rows);
        for y in 0..rows {
            for x in 0..columns {
                grid.cells[y * columns + x] = f(x, y);
            }
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, pos: CursorPosition) -> bool {
        pos.x < self.columns && pos.y < self.rows
    }

    pub fn is_drawn(&self, pos: CursorPosition) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Marks a cell as drawn. Returns `true` only if the cell changed.
    pub fn draw(&mut self, pos: CursorPosition) -> bool {
        self.write(pos, true)
    }

    /// Clears a drawn cell. Returns `true` only if the cell changed.
    pub fn erase(&mut self, pos: CursorPosition) -> bool {
        self.write(pos, false)
    }

    /// Erases every cell, returning how many were drawn.
    pub fn clear(&mut self) -> usize {
        let drawn = self.drawn_count();
        self.cells.iter_mut().for_each(|cell| *cell = false);
        drawn
    }

    pub fn drawn_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Nested row vectors, the layout used by the export file.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(<[bool]>::to_vec)
            .collect()
    }

    fn index(&self, pos: CursorPosition) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.columns + pos.x)
    }

    fn write(&mut self, pos: CursorPosition, value: bool) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i] != value => {
                self.cells[i] = value;
                true
            }
            _ => false,
        }
    }
}
