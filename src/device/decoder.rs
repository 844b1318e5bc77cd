//! Frame → event decoding.

use std::time::Instant;

use super::frame::{CommandCode, Frame};
use crate::board::PenState;
use crate::bus::{ConfirmTarget, Envelope, Event, EventBus};

/// Turns raw device frames into bus events.
///
/// Unknown command bytes and short frames are dropped silently: the
/// biosignal stream is noisy and garbage must never reach a surface.
#[derive(Debug, Default)]
pub struct CommandDecoder {
    decoded: u64,
    dropped: u64,
}

impl CommandDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one notification payload.
    ///
    /// `current_pen` is the pen state of the surface receiving events; the
    /// toggle command publishes its successor in the cycle.
    pub fn decode(&mut self, bytes: &[u8], current_pen: PenState) -> Option<Event> {
        let Some(frame) = Frame::parse(bytes) else {
            log::debug!("Dropping short frame ({} bytes)", bytes.len());
            self.dropped += 1;
            return None;
        };
        let Some(command) = frame.command() else {
            log::debug!(
                "Ignoring unknown command byte 0x{:02x} (value {})",
                frame.code,
                frame.value
            );
            self.dropped += 1;
            return None;
        };

        log::trace!("Frame: {:?} value {}", command, frame.value);
        self.decoded += 1;

        let event = match command {
            CommandCode::Move => Event::Movement(frame.value),
            CommandCode::SelectMode => Event::Mode(frame.value),
            CommandCode::TogglePen => Event::Pen(current_pen.next()),
            CommandCode::Jaw => Event::Jaw(frame.value),
            CommandCode::OpenMenu => Event::Menu,
            CommandCode::ConfirmIndex => Event::Confirm(ConfirmTarget::Index(frame.value)),
            CommandCode::Navigate => Event::Navigation(frame.value),
            CommandCode::TripleBlink => Event::Confirm(ConfirmTarget::Highlighted),
        };
        Some(event)
    }

    /// Decodes a notification and publishes the result. Returns `true` if an
    /// event was published.
    pub fn dispatch(
        &mut self,
        bus: &EventBus,
        bytes: &[u8],
        current_pen: PenState,
        received_at: Instant,
    ) -> bool {
        match self.decode(bytes, current_pen) {
            Some(event) => {
                bus.publish(&Envelope::new(event, received_at));
                true
            }
            None => false,
        }
    }

    pub fn decoded_count(&self) -> u64 {
        self.decoded
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{Channel, Handler};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn decode(bytes: &[u8]) -> Option<Event> {
        CommandDecoder::new().decode(bytes, PenState::Disabled)
    }

    #[test]
    fn command_table() {
        assert_eq!(decode(b"M\x08"), Some(Event::Movement(8)));
        assert_eq!(decode(&[b'S', 3]), Some(Event::Mode(3)));
        assert_eq!(decode(&[b'J', 4]), Some(Event::Jaw(4)));
        assert_eq!(decode(&[b'A', 0]), Some(Event::Menu));
        assert_eq!(
            decode(&[b'E', 2]),
            Some(Event::Confirm(ConfirmTarget::Index(2)))
        );
        assert_eq!(decode(&[b'N', 1]), Some(Event::Navigation(1)));
        assert_eq!(
            decode(&[b'C', 0]),
            Some(Event::Confirm(ConfirmTarget::Highlighted))
        );
    }

    #[test]
    fn out_of_range_values_pass_through_undecided() {
        // Validation belongs to the state machine
        assert_eq!(decode(&[b'S', 9]), Some(Event::Mode(9)));
    }

    #[test]
    fn pen_toggle_cycles_from_current_state() {
        let mut decoder = CommandDecoder::new();
        assert_eq!(
            decoder.decode(&[b'T', 0], PenState::Eraser),
            Some(Event::Pen(PenState::Disabled))
        );
        assert_eq!(
            decoder.decode(&[b'P', 0], PenState::Disabled),
            Some(Event::Pen(PenState::Pen))
        );
        assert_eq!(
            decoder.decode(&[b'T', 7], PenState::Pen),
            Some(Event::Pen(PenState::Eraser))
        );
    }

    #[test]
    fn noise_is_counted_and_dropped() {
        let mut decoder = CommandDecoder::new();
        assert_eq!(decoder.decode(b"M", PenState::Disabled), None);
        assert_eq!(decoder.decode(b"Z\x01", PenState::Disabled), None);
        assert_eq!(decoder.dropped_count(), 2);
        assert_eq!(decoder.decoded_count(), 0);
    }

    #[test]
    fn dispatch_publishes_on_matching_channel() {
        let bus = EventBus::with_all_channels();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handler: Handler = {
            let seen = Rc::clone(&seen);
            Rc::new(move |env| seen.borrow_mut().push(env.event))
        };
        bus.subscribe(Channel::Pen, handler);

        let mut decoder = CommandDecoder::new();
        assert!(decoder.dispatch(&bus, &[b'T', 0], PenState::Eraser, Instant::now()));
        assert!(!decoder.dispatch(&bus, &[b'T'], PenState::Eraser, Instant::now()));
        assert_eq!(*seen.borrow(), vec![Event::Pen(PenState::Disabled)]);
    }
}
