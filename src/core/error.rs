//! Error types for match setup and dealing.
//!
//! Two families:
//! - validation errors from the setup action (bad names, bad formation),
//!   reported to the caller with the prior state left untouched
//! - resource exhaustion from the deck, which signals a sizing defect upstream
//!
//! Actions invoked in the wrong stage are not errors at all; the transition
//! simply reports that it was not applied.

use thiserror::Error;

use super::player::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Enter names for both players ({side} name is empty).")]
    EmptyName { side: Side },

    #[error("Formation must look like 4-4-2 or 4-2-3-1 (got {raw:?}).")]
    MalformedFormation { raw: String },

    #[error("Each line in the formation must be greater than 0 (got {raw:?}).")]
    NonPositiveLine { raw: String },

    #[error("Formation must total 10 outfield players (got {total}).")]
    InvalidTotal { total: u32 },

    #[error("Not enough cards left in the deck: requested {requested}, {remaining} remaining.")]
    InsufficientCards { requested: usize, remaining: usize },
}

impl MatchError {
    /// True for errors caused by setup input rather than by dealing.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, MatchError::InsufficientCards { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
