//! Bounded match log, most recent entry first.

use im::Vector;
use serde::{Deserialize, Serialize};

/// A capped, newest-first list of log lines.
///
/// Backed by a persistent vector so cloning a match state shares the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLog {
    entries: Vector<String>,
    capacity: usize,
}

impl MatchLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Add an entry at the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The newest entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = MatchLog::new(10);
        log.push("first");
        log.push("second");

        assert_eq!(log.latest(), Some("second"));
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["second", "first"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = MatchLog::new(3);
        for i in 0..5 {
            log.push(format!("entry {i}"));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.iter().collect::<Vec<_>>(),
            vec!["entry 4", "entry 3", "entry 2"]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut log = MatchLog::new(5);
        log.push("shared");
        let snapshot = log.clone();

        log.push("later");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut log = MatchLog::new(5);
        log.push("x");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.latest(), None);
    }
}
