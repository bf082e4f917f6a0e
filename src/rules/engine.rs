//! Rules engine trait for match implementations.
//!
//! A game implements `RulesEngine` to define:
//! - What actions are legal in a state
//! - How an action turns one state into the next
//! - When the match is over, and who won
//!
//! Transitions are pure: `apply_action` takes the current state by
//! reference and returns a new one, so callers can keep before/after
//! snapshots without aliasing.

use smallvec::SmallVec;

use crate::core::action::Action;
use crate::core::error::Result;
use crate::core::player::Side;

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// No winner.
    Draw,
}

impl GameResult {
    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::Winner(side) => Some(*side),
            GameResult::Draw => None,
        }
    }
}

/// The outcome of applying one action.
#[derive(Clone, Debug)]
pub struct Transition<S, E> {
    /// The state after the action (a copy of the input when not applied).
    pub state: S,

    /// Events emitted by the action, in order.
    pub events: SmallVec<[E; 4]>,

    /// False when the action did not match the current stage.
    pub applied: bool,
}

impl<S, E> Transition<S, E> {
    /// An applied transition.
    pub fn applied(state: S, events: SmallVec<[E; 4]>) -> Self {
        Self {
            state,
            events,
            applied: true,
        }
    }

    /// A stage-mismatch no-op.
    pub fn ignored(state: S) -> Self {
        Self {
            state,
            events: SmallVec::new(),
            applied: false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec if nothing can be done (never happens
///   for a match: `Reset` is always available once started)
/// - `apply_action`: Must be deterministic given the state's RNG
/// - `apply_action`: An action that does not fit the stage returns
///   `Transition::ignored`, not an error
/// - `is_terminal`: Return None if the match continues
pub trait RulesEngine {
    /// The full match state.
    type State: Clone;

    /// Structured events emitted by transitions.
    type Event;

    /// Enumerate the argument-free actions that would be applied in `state`.
    ///
    /// `Setup` carries user input and is never enumerated.
    fn legal_actions(&self, state: &Self::State) -> Vec<Action>;

    /// Apply an action, producing the next state.
    fn apply_action(
        &self,
        state: &Self::State,
        action: &Action,
    ) -> Result<Transition<Self::State, Self::Event>>;

    /// Check if the match is over.
    ///
    /// Returns `Some(result)` if the match has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Check whether an argument-free action would be applied.
    fn is_legal(&self, state: &Self::State, action: &Action) -> bool {
        self.legal_actions(state).contains(action)
    }
}
