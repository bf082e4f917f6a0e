//! Match rules: the `RulesEngine` trait and the formation parser.

pub mod engine;
pub mod formation;

pub use engine::{GameResult, RulesEngine, Transition};
pub use formation::{build_positions, parse_formation, Formation, OUTFIELD_PLAYERS};
