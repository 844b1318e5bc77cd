//! Board store and the value types describing cursor state.
//!
//! - [`BoardGrid`]: the drawn/erased cell matrix
//! - [`CursorPosition`]: bounded grid coordinate
//! - [`DrawingMode`]: which axis or diagonal movement is constrained to
//! - [`PenState`]: whether movement draws, erases, or only moves

pub mod cursor;
pub mod grid;
pub mod mode;
pub mod pen;

pub use cursor::CursorPosition;
pub use grid::BoardGrid;
pub use mode::DrawingMode;
pub use pen::PenState;
