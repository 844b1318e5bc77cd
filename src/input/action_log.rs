//! Rolling log of human-readable action descriptions shown next to the board.

use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 20;

/// Capped list of `[HH:MM:SS] message` lines, oldest first.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActionLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a timestamped entry, dropping the oldest when full.
    pub fn push(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::info!("{message}");
        let stamp = chrono::Local::now().format("%H:%M:%S");
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(format!("[{stamp}] {message}"));
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let mut log = ActionLog::new(3);
        for i in 0..5 {
            log.push(format!("entry {i}"));
        }
        let entries: Vec<&str> = log.entries().collect();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].ends_with("entry 2"));
        assert!(log.last().unwrap().ends_with("entry 4"));
    }

    #[test]
    fn entries_are_timestamped() {
        let mut log = ActionLog::default();
        log.push("Menu activated");
        let line = log.last().unwrap();
        // "[HH:MM:SS] "
        assert_eq!(line.as_bytes()[0], b'[');
        assert_eq!(&line[9..11], "] ");
    }
}
