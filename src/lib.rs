//! # card-football
//!
//! A two-player card football match engine.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `(state, action) -> transition`. The input state
//!    is never mutated, so callers can compare before and after freely.
//!
//! 2. **Closed Stages**: The match is one `Stage` variant at a time, each
//!    carrying only the data valid in it.
//!
//! 3. **Injected Randomness**: Every shuffle and substitute pick comes from the
//!    seeded `GameRng` inside the state. Same seed and actions, same match.
//!
//! ## Architecture
//!
//! - **Silent Stage Gating**: An action sent in the wrong stage is ignored
//!   (`applied == false`), never an error. Only setup validation and a short
//!   deck surface as `MatchError`.
//!
//! - **Persistent Data Structures**: The log and action history use `im-rs`
//!   so cloning a state is cheap.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, actions, errors, match log
//! - `cards`: Standard 52-card deck
//! - `rules`: RulesEngine trait and formation parsing
//! - `games`: The football match itself

pub mod core;
pub mod cards;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng, GameRngState,
    MatchConfig,
    Action, ActionRecord,
    MatchError, Result,
    MatchLog,
};

pub use crate::cards::{Card, Deck, Rank, Suit, DECK_SIZE};

pub use crate::rules::{
    build_positions, parse_formation, Formation, GameResult, RulesEngine, Transition,
};

pub use crate::games::football::{
    FootballRules, MatchEvent, MatchSnapshot, MatchState, MatchTransition, Stage, StageKind,
};
