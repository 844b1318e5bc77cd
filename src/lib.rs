//! Library exports for neuroscribe.
//!
//! Drawing on a character grid with a wearable biosignal headset. Device
//! frames are decoded into bus events, which drive either the main drawing
//! board or the practice game. The binaries and integration tests build on
//! the modules exported here.

pub mod app;
pub mod board;
pub mod bus;
pub mod config;
pub mod device;
pub mod history;
pub mod input;
pub mod session;
pub mod tutorial;
pub mod ui;

pub use app::{ActiveSurface, App};
pub use config::Config;
