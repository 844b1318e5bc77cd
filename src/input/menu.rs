//! Modal menu opened from the device.

use serde::{Deserialize, Serialize};

/// What confirming a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Hand the device over to the practice game
    PracticeGame,
    /// Export the board to a file
    SaveDrawing,
    /// Leave the menu without doing anything
    CloseMenu,
    /// Erase every drawn cell
    ClearBoard,
}

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub action: MenuAction,
}

impl MenuItem {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        icon: &'static str,
        action: MenuAction,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            action,
        }
    }
}

/// Entries of the main drawing surface menu, in display order.
pub fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new("game", "Practice Game", "🎮", MenuAction::PracticeGame),
        MenuItem::new("save", "Save Drawing", "💾", MenuAction::SaveDrawing),
        MenuItem::new("close", "Close Menu", "❌", MenuAction::CloseMenu),
        MenuItem::new("clear", "Clear Board", "🧹", MenuAction::ClearBoard),
    ]
}

/// Menu visibility and selection recorded with each history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub active: bool,
    pub selection: usize,
}

/// Open/closed flag plus a wrapping selection over a fixed item list.
///
/// The selection index is always `< items.len()` when there are items.
#[derive(Debug, Clone)]
pub struct MenuState {
    active: bool,
    selection: usize,
    items: Vec<MenuItem>,
}

impl MenuState {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            active: false,
            selection: 0,
            items,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selection)
    }

    /// Activates the menu with the first entry highlighted.
    pub fn open(&mut self) {
        self.active = true;
        self.selection = 0;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    /// Moves the highlight: 0 = previous, 1 = next, wrapping at both ends.
    ///
    /// Returns the new index, or `None` for an empty menu or an unknown
    /// direction.
    pub fn navigate(&mut self, direction: u8) -> Option<usize> {
        let n = self.items.len();
        if n == 0 {
            return None;
        }
        self.selection = match direction {
            0 => (self.selection + n - 1) % n,
            1 => (self.selection + 1) % n,
            _ => return None,
        };
        Some(self.selection)
    }

    pub fn snapshot(&self) -> MenuSnapshot {
        MenuSnapshot {
            active: self.active,
            selection: self.selection,
        }
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(default_items())
    }
}
