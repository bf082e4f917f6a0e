//! Match configuration.
//!
//! A `MatchConfig` fixes the tunable sizes of a match at startup:
//! - how many face-down substitutes each side is dealt
//! - how many entries the match log keeps
//! - how many standard-phase penalty kicks each side takes
//!
//! Penalty outcome thresholds are rules, not configuration, and live with
//! the shootout engine.

use serde::{Deserialize, Serialize};

/// Default number of face-down substitutes per side.
pub const DEFAULT_SUBSTITUTES: usize = 3;

/// Default number of log entries kept (most recent first).
pub const DEFAULT_LOG_CAPACITY: usize = 140;

/// Default number of standard-phase penalty kicks per side.
pub const DEFAULT_PENALTY_KICKS: usize = 5;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Face-down substitutes dealt to each side at setup.
    pub substitutes: usize,

    /// Maximum match log entries retained.
    pub log_capacity: usize,

    /// Standard-phase kicks per side before sudden death.
    pub penalty_kicks: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            substitutes: DEFAULT_SUBSTITUTES,
            log_capacity: DEFAULT_LOG_CAPACITY,
            penalty_kicks: DEFAULT_PENALTY_KICKS,
        }
    }
}

impl MatchConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substitutes dealt per side.
    #[must_use]
    pub fn with_substitutes(mut self, substitutes: usize) -> Self {
        self.substitutes = substitutes;
        self
    }

    /// Set the log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Set the standard-phase penalty kicks per side.
    ///
    /// Panics if zero; a shootout needs at least one kick each.
    #[must_use]
    pub fn with_penalty_kicks(mut self, kicks: usize) -> Self {
        assert!(kicks > 0, "Must have at least 1 penalty kick");
        self.penalty_kicks = kicks;
        self
    }

    /// Cards the setup deal takes from the deck for a lineup of `positions` slots.
    #[must_use]
    pub fn setup_cards(&self, positions: usize) -> usize {
        2 * positions + 2 * self.substitutes
    }
}
