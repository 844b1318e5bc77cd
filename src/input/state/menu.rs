use std::time::Instant;

use super::{InteractionState, Outcome, SurfaceRequest};
use crate::bus::ConfirmTarget;
use crate::input::menu::MenuAction;

impl InteractionState {
    /// Activates the menu with the first entry highlighted.
    pub fn open_menu(&mut self, now: Instant) -> Outcome {
        self.menu.open();
        self.log.push("Menu activated");
        self.touch(now);
        Outcome::MenuOpened
    }

    /// Moves the highlight while the menu is open.
    pub fn navigate_menu(&mut self, direction: u8, now: Instant) -> Outcome {
        if !self.menu.is_active() {
            log::debug!("Menu closed; ignoring navigation {direction}");
            return Outcome::Ignored;
        }
        match self.menu.navigate(direction) {
            Some(index) => {
                let label = if direction == 0 { "Left" } else { "Right" };
                self.log.push(format!("Menu navigation: {label}"));
                self.touch(now);
                Outcome::MenuNavigated(index)
            }
            None => Outcome::Ignored,
        }
    }

    /// Runs a menu entry and closes the menu.
    ///
    /// [`ConfirmTarget::Index`] must name an existing entry, otherwise the
    /// menu stays open. [`ConfirmTarget::Highlighted`] always runs the
    /// current selection. The two paths are kept separate: an explicit
    /// index need not match the highlight.
    pub fn confirm_menu(&mut self, target: ConfirmTarget, now: Instant) -> Outcome {
        if !self.menu.is_active() {
            log::debug!("Menu closed; ignoring confirm {target:?}");
            return Outcome::Ignored;
        }
        let index = match target {
            ConfirmTarget::Index(index) => {
                let index = index as usize;
                if index >= self.menu.len() {
                    log::debug!("Confirm index {index} out of range; menu stays open");
                    return Outcome::Ignored;
                }
                index
            }
            ConfirmTarget::Highlighted => {
                self.log.push("Triple blink detected - confirming selection");
                self.menu.selection()
            }
        };
        let Some(action) = self.menu.item(index).map(|item| item.action) else {
            return Outcome::Ignored;
        };

        self.run_menu_action(action, now);
        self.close_menu();
        self.log.push(format!("Selected menu item {index}"));
        self.touch(now);
        Outcome::MenuConfirmed(action)
    }

    /// Leaves the menu and hides the jaw indicator.
    pub fn close_menu(&mut self) {
        if self.menu.is_active() {
            self.menu.close();
            self.needs_redraw = true;
        }
        self.jaw = None;
    }

    fn run_menu_action(&mut self, action: MenuAction, now: Instant) {
        match action {
            MenuAction::PracticeGame => self.pending_requests.push(SurfaceRequest::StartTutorial),
            MenuAction::SaveDrawing => self.pending_requests.push(SurfaceRequest::SaveDrawing),
            MenuAction::CloseMenu => self.close_menu(),
            MenuAction::ClearBoard => self.clear_board(now),
        }
    }
}
