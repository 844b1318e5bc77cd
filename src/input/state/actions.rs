use std::time::Instant;

use crate::board::{CursorPosition, DrawingMode, PenState};
use crate::bus::{Envelope, Event};

use super::{InteractionState, JawIndicator};
use crate::input::menu::MenuAction;

/// Effect of one event on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed
    Ignored,
    /// Cursor moved; `changed_cell` is set when the pen altered the
    /// destination cell
    Moved {
        from: CursorPosition,
        to: CursorPosition,
        changed_cell: bool,
    },
    /// Direction is valid for the mode but the cursor sits against the
    /// board edge
    Blocked(CursorPosition),
    ModeChanged(DrawingMode),
    PenChanged(PenState),
    JawUpdated(u8),
    MenuOpened,
    MenuNavigated(usize),
    MenuConfirmed(MenuAction),
}

impl InteractionState {
    /// Applies one bus event.
    ///
    /// Movement, mode and pen events are dropped entirely while the menu
    /// is open.
    pub fn handle(&mut self, envelope: &Envelope) -> Outcome {
        let now = envelope.received_at;
        match envelope.event {
            Event::Movement(_) | Event::Mode(_) | Event::Pen(_) if self.menu.is_active() => {
                log::debug!("Menu active; suppressing {:?}", envelope.event);
                Outcome::Ignored
            }
            Event::Movement(direction) => self.on_movement(direction, now),
            Event::Mode(code) => self.on_mode(code, now),
            Event::Pen(pen) => self.on_pen(pen, now),
            Event::Jaw(seconds) => self.on_jaw(seconds, now),
            Event::Menu => self.open_menu(now),
            Event::Navigation(direction) => self.navigate_menu(direction, now),
            Event::Confirm(target) => self.confirm_menu(target, now),
        }
    }

    /// Moves the cursor one step along the current mode's axis.
    ///
    /// A movement closer than the configured delay to the previous accepted
    /// one is dropped. If the pen is down the destination cell is drawn or
    /// erased as part of the same history entry.
    pub fn on_movement(&mut self, direction: u8, now: Instant) -> Outcome {
        if self.menu.is_active() {
            return Outcome::Ignored;
        }
        if let Some(last) = self.last_move {
            if now.saturating_duration_since(last) < self.move_delay {
                log::debug!("Debounced movement {direction}");
                return Outcome::Ignored;
            }
        }
        self.last_move = Some(now);

        let Some((dx, dy)) = self.mode.step(direction) else {
            log::debug!(
                "Direction {direction} has no meaning in {} mode",
                self.mode.name()
            );
            return Outcome::Ignored;
        };

        let from = self.cursor;
        let to = from.offset_clamped(dx, dy, self.board.columns(), self.board.rows());
        if to == from {
            log::debug!("Movement {direction} blocked at {from}");
            return Outcome::Blocked(from);
        }
        self.cursor = to;

        let changed_cell = match self.pen {
            PenState::Disabled => false,
            PenState::Pen => {
                self.log.push(format!("Drew at {to}"));
                self.board.draw(to)
            }
            PenState::Eraser => {
                self.log.push(format!("Erased at {to}"));
                self.board.erase(to)
            }
        };

        self.record();
        self.touch(now);
        Outcome::Moved {
            from,
            to,
            changed_cell,
        }
    }

    /// Switches the drawing mode. Codes outside 0-3 are ignored.
    pub fn on_mode(&mut self, code: u8, now: Instant) -> Outcome {
        if self.menu.is_active() {
            return Outcome::Ignored;
        }
        let Some(mode) = DrawingMode::from_code(code) else {
            log::debug!("Ignoring out-of-range mode {code}");
            return Outcome::Ignored;
        };
        self.mode = mode;
        self.log.push(format!("Mode switched to {}", mode.name()));
        self.record();
        self.touch(now);
        Outcome::ModeChanged(mode)
    }

    /// Applies the pen state computed by the decoder. Always recorded.
    pub fn on_pen(&mut self, pen: PenState, now: Instant) -> Outcome {
        if self.menu.is_active() {
            return Outcome::Ignored;
        }
        self.pen = pen;
        self.log.push(format!("Pen state changed to: {}", pen.name()));
        self.record();
        self.touch(now);
        Outcome::PenChanged(pen)
    }

    /// Shows how long the jaw has been clenched. Zero hides the indicator.
    pub fn on_jaw(&mut self, seconds: u8, now: Instant) -> Outcome {
        self.jaw = (seconds > 0).then_some(JawIndicator {
            seconds,
            since: now,
        });
        self.log.push(format!("Jaw timer: {seconds}s"));
        self.needs_redraw = true;
        Outcome::JawUpdated(seconds)
    }

    /// Erases every cell. Recorded as one history entry.
    pub fn clear_board(&mut self, now: Instant) {
        let cleared = self.board.clear();
        log::debug!("Cleared {cleared} cells");
        self.log.push("Board cleared");
        self.record();
        self.touch(now);
    }
}
