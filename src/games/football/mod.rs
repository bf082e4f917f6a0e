//! Card football: a two-side match played one position at a time.
//!
//! Each formation slot is a battle between one lineup card per side. The
//! attacker reveals, may swap in a face-down substitute, then the defender
//! reveals and the higher card takes the point. A level match goes to a
//! penalty shootout with sudden death.
//!
//! ## Example
//!
//! ```
//! use card_football::games::football::{FootballRules, StageKind};
//! use card_football::{Action, RulesEngine};
//!
//! let rules = FootballRules::default();
//! let state = rules.new_match(7);
//! let t = rules
//!     .apply_action(&state, &Action::setup("Rovers", "United", "4-4-2"))
//!     .unwrap();
//!
//! assert!(t.applied);
//! assert_eq!(t.state.snapshot().stage, StageKind::BattleStart);
//! assert_eq!(t.state.positions().len(), 11);
//! ```

mod battle;
mod event;
mod penalty;
mod rules;
mod setup;
mod snapshot;
mod state;

pub use battle::{attacker_for_battle, max_subs};
pub use event::{MatchEvent, MatchEvents};
pub use penalty::{PenaltyOutcome, MISS_MAX, WOODWORK_MAX};
pub use rules::{FootballRules, MatchTransition};
pub use snapshot::{
    BattleView, CardView, MatchSnapshot, OutcomeView, PenaltyPhaseKind, PenaltyView,
    PositionView, SideView,
};
pub use state::{
    Battle, BattleOutcome, Decider, MatchOutcome, MatchState, PenaltyKick, Player, Shootout,
    ShootoutPhase, Stage, StageKind,
};
