//! Device-side plumbing: frames, decoding, and the transport lifecycle.
//!
//! Raw notifications from the wearable arrive as two-byte frames. The
//! [`CommandDecoder`] turns them into [`Event`](crate::bus::Event)s on the
//! bus; [`DeviceLink`] tracks whether a transport is connected and stops
//! dispatch once it is not.

pub mod decoder;
pub mod frame;
pub mod link;
pub mod script;
pub mod transport;

pub use decoder::CommandDecoder;
pub use frame::{CommandCode, Frame};
pub use link::{DeviceLink, LinkState};
pub use script::{ScriptError, ScriptTransport};
pub use transport::{Incoming, Timed, Transport, TransportError, UiCommand};
