//! Action representation.
//!
//! Every state change in a match is triggered by one discrete `Action`,
//! standing in for a button press or form submission in a presentation
//! layer. Only `Setup` carries arguments; every other action works on the
//! implicit current state.

use serde::{Deserialize, Serialize};

/// A state-transition request.
///
/// ## Example
///
/// ```
/// use card_football::core::Action;
///
/// let setup = Action::setup("Rovers", "United", "4-4-2");
/// assert!(matches!(setup, Action::Setup { .. }));
/// assert_eq!(Action::RevealAttacker.name(), "reveal-attacker");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Start a match from two names and a formation string.
    Setup {
        home: String,
        away: String,
        formation: String,
    },
    /// Turn the attacker's card face up.
    RevealAttacker,
    /// Swap the attacker's card for a random face-down substitute.
    UseSubstitute,
    /// Lock in the attacker's card and hand over to the defender.
    AdvanceToDefender,
    /// Turn the defender's card face up and score the battle.
    RevealDefender,
    /// Move on from a resolved battle to the next position.
    NextBattle,
    /// Close regulation after the final battle.
    FinishRegulation,
    /// Reveal the next penalty card in the shootout.
    RevealNextPenalty,
    /// Abandon the match and return to setup.
    Reset,
}

impl Action {
    /// Build a setup action.
    #[must_use]
    pub fn setup(home: impl Into<String>, away: impl Into<String>, formation: impl Into<String>) -> Self {
        Action::Setup {
            home: home.into(),
            away: away.into(),
            formation: formation.into(),
        }
    }

    /// Stable kebab-case name, used in logs and on the command line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Setup { .. } => "setup",
            Action::RevealAttacker => "reveal-attacker",
            Action::UseSubstitute => "use-substitute",
            Action::AdvanceToDefender => "advance-to-defender",
            Action::RevealDefender => "reveal-defender",
            Action::NextBattle => "next-battle",
            Action::FinishRegulation => "finish-regulation",
            Action::RevealNextPenalty => "reveal-next-penalty",
            Action::Reset => "reset",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An applied action with its position in the match history.
///
/// Replaying the recorded actions against a state built from the same seed
/// reproduces the match exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Sequence number, starting at 0 for the first applied action.
    pub sequence: usize,

    /// The action taken.
    pub action: Action,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(sequence: usize, action: Action) -> Self {
        Self { sequence, action }
    }
}
