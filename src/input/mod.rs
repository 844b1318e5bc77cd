//! Device event interpretation.
//!
//! This module turns bus events into cursor movement, drawing-mode and pen
//! switches, and modal menu navigation. [`InteractionState`] owns all of a
//! surface's mutable state and records undo/redo snapshots after every
//! mutating action.

pub mod action_log;
pub mod menu;
pub mod state;

pub use action_log::ActionLog;
pub use menu::{MenuAction, MenuItem, MenuSnapshot, MenuState};
pub use state::{
    InteractionMode, InteractionState, JawIndicator, Outcome, StateSnapshot, SurfaceRequest,
    SurfaceSettings, SurfaceView,
};
