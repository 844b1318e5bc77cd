mod actions;
mod core;
mod menu;

pub use actions::Outcome;
pub use self::core::{
    InteractionMode, InteractionState, JawIndicator, StateSnapshot, SurfaceRequest,
    SurfaceSettings, SurfaceView,
};
