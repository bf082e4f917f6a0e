//! Core engine types: roles, actions, RNG, configuration, errors, logging.
//!
//! These are the building blocks shared by the formation parser, the card
//! service and the match engine.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod log;

pub use player::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use config::MatchConfig;
pub use action::{Action, ActionRecord};
pub use error::{MatchError, Result};
pub use log::MatchLog;
