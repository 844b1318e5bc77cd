//! Practice game teaching the device controls.
//!
//! Each level shows a target shape on a small board; the player traces it
//! with the same movement/mode/pen events as the main board. A level passes
//! once enough of the target is covered, and fails when its timer runs out.

pub mod levels;
pub mod session;

pub use levels::{Level, default_levels};
pub use session::{LevelStatus, TutorialSession};
