//! Transport boundary: where device notifications come from.

use std::time::Instant;
use thiserror::Error;

use super::script::ScriptError;

/// Failure to bring up a transport. Surfaced to the user as a connection
/// failure; the link stays disconnected until `connect` is invoked again.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("device link unavailable: {0}")]
    Unavailable(String),

    #[error("pairing rejected: {0}")]
    PairingRejected(String),

    #[error("notification characteristic not found: {0}")]
    CharacteristicNotFound(String),

    #[error("invalid session script: {0}")]
    Script(#[from] ScriptError),

    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host-side interaction interleaved with device frames (toolbar buttons
/// in a graphical front end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Undo,
    Redo,
    Clear,
    CloseMenu,
    TutorialStart,
    TutorialNext,
    TutorialReset,
    TutorialSkip,
}

impl UiCommand {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "undo" => Some(Self::Undo),
            "redo" => Some(Self::Redo),
            "clear" => Some(Self::Clear),
            "close-menu" => Some(Self::CloseMenu),
            "tutorial-start" => Some(Self::TutorialStart),
            "tutorial-next" => Some(Self::TutorialNext),
            "tutorial-reset" => Some(Self::TutorialReset),
            "tutorial-skip" => Some(Self::TutorialSkip),
            _ => None,
        }
    }
}

/// Something delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// Raw notification payload, not yet validated
    Frame(Vec<u8>),
    Ui(UiCommand),
}

/// A value stamped with its arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timed<T> {
    pub at: Instant,
    pub item: T,
}

/// Source of device notifications with a connect/disconnect lifecycle.
///
/// `recv` hands out notifications in arrival order; `None` means the
/// stream has ended and the link should be considered lost.
pub trait Transport {
    /// Human-readable name for log lines.
    fn name(&self) -> &str;

    fn connect(&mut self) -> Result<(), TransportError>;

    fn recv(&mut self) -> Option<Timed<Incoming>>;

    fn disconnect(&mut self);
}
