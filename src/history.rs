//! Bounded undo/redo history.
//!
//! Entries live in a ring buffer with a movable cursor. Recording while the
//! cursor sits before the tail cuts the redo tail first; recording past the
//! capacity evicts the oldest entry instead of growing.

use std::collections::VecDeque;

/// Default number of snapshots kept per surface.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Undo/redo window over immutable snapshots.
///
/// The cursor is `None` while the history is empty (index -1), otherwise it
/// always points into `entries`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates an empty history holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Appends a snapshot after the cursor.
    ///
    /// Any redo-able entries after the cursor are dropped first. When the
    /// buffer is full the oldest entry is evicted and the cursor stays on
    /// the new tail.
    pub fn record(&mut self, snapshot: T) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        let cut = self.entries.len() - keep;
        if cut > 0 {
            log::debug!("History: discarding {cut} redo entries");
        }
        self.entries.truncate(keep);
        self.entries.push_back(snapshot);

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back one entry and returns it, or `None` at the earliest entry.
    pub fn undo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.entries.get(c - 1)
            }
            _ => None,
        }
    }

    /// Steps forward one entry and returns it, or `None` at the tail.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entries.get(next)
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Cursor as a signed index; -1 when empty.
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.entries.len()
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_has_cursor_minus_one() {
        let mut history: History<u32> = History::new(10);
        assert_eq!(history.cursor_index(), -1);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn undo_stops_at_first_entry() {
        let mut history = History::new(10);
        history.record(1);
        assert!(history.undo().is_none());
        assert_eq!(history.cursor_index(), 0);

        history.record(2);
        assert_eq!(history.undo(), Some(&1));
        assert!(history.undo().is_none());
    }

    #[test]
    fn undo_then_redo_returns_same_entry() {
        let mut history = History::new(10);
        for value in 0..5 {
            history.record(value);
        }
        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.redo(), Some(&4));
        assert!(history.redo().is_none());
        assert_eq!(history.current(), Some(&4));
    }

    #[test]
    fn recording_after_undo_cuts_redo_tail() {
        let mut history = History::new(10);
        history.record("a");
        history.record("b");
        history.record("c");
        history.undo();
        history.undo();

        history.record("d");
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), ["a", "d"]);
        assert!(!history.can_redo());
        assert_eq!(history.cursor_index(), 1);
    }

    #[test]
    fn overflow_evicts_oldest_entry() {
        let mut history = History::new(DEFAULT_MAX_ENTRIES);
        for value in 0..=DEFAULT_MAX_ENTRIES {
            history.record(value);
        }
        assert_eq!(history.len(), DEFAULT_MAX_ENTRIES);
        assert_eq!(history.iter().next(), Some(&1));
        assert_eq!(history.current(), Some(&DEFAULT_MAX_ENTRIES));
        assert_eq!(history.cursor_index(), DEFAULT_MAX_ENTRIES as isize - 1);

        // The evicted step is gone: at most len - 1 undos are possible
        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, DEFAULT_MAX_ENTRIES - 1);
        assert_eq!(history.current(), Some(&1));
    }

    #[test]
    fn cursor_stays_in_range_under_mixed_operations() {
        let mut history = History::new(3);
        for step in 0..50u32 {
            match step % 5 {
                0 | 1 | 2 => history.record(step),
                3 => {
                    history.undo();
                }
                _ => {
                    history.redo();
                }
            }
            let cursor = history.cursor_index();
            assert!(cursor >= -1 && cursor < history.len() as isize);
            assert!(history.len() <= 3);
        }
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = History::new(0);
        history.record(1);
        history.record(2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&2));
    }
}
