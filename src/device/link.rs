//! Connection lifecycle around a [`Transport`].

use super::transport::{Incoming, Timed, Transport, TransportError};

/// Whether notifications are currently flowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connected,
}

/// Owns a transport and gates delivery on the connection state.
///
/// A failed connect leaves the link disconnected; nothing retries
/// automatically.
pub struct DeviceLink<T: Transport> {
    transport: T,
    state: LinkState,
    received: u64,
}

impl<T: Transport> DeviceLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: LinkState::Disconnected,
            received: 0,
        }
    }

    pub fn connect(&mut self) -> Result<(), TransportError> {
        if self.state == LinkState::Connected {
            return Ok(());
        }
        log::info!("Connecting to {}", self.transport.name());
        match self.transport.connect() {
            Ok(()) => {
                self.state = LinkState::Connected;
                log::info!("Connected to {}", self.transport.name());
                Ok(())
            }
            Err(err) => {
                log::error!("Connection to {} failed: {err}", self.transport.name());
                self.state = LinkState::Disconnected;
                Err(err)
            }
        }
    }

    /// Next notification, or `None` when disconnected. An exhausted stream
    /// disconnects the link.
    pub fn recv(&mut self) -> Option<Timed<Incoming>> {
        if self.state != LinkState::Connected {
            return None;
        }
        match self.transport.recv() {
            Some(item) => {
                self.received += 1;
                Some(item)
            }
            None => {
                log::info!("{} stream ended", self.transport.name());
                self.disconnect();
                None
            }
        }
    }

    pub fn disconnect(&mut self) {
        if self.state == LinkState::Connected {
            self.transport.disconnect();
            self.state = LinkState::Disconnected;
            log::info!("Disconnected from {}", self.transport.name());
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    pub fn received_count(&self) -> u64 {
        self.received
    }

    pub fn name(&self) -> &str {
        self.transport.name()
    }
}
