//! Structured match events.
//!
//! Every applied transition emits one or more `MatchEvent`s. The controller
//! renders each into a human-readable line of the match log using the
//! players' display names.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::penalty::PenaltyOutcome;
use crate::cards::Card;
use crate::core::{Side, SideMap};

/// Events emitted by a single transition.
pub type MatchEvents = SmallVec<[MatchEvent; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum MatchEvent {
    BattleStarted {
        number: usize,
        position: String,
        attacker: Side,
    },
    CardsDealt {
        substitutes: usize,
    },
    HomeAdvantage,
    AttackerRevealed {
        side: Side,
        card: Card,
    },
    SubstituteUsed {
        side: Side,
        position: String,
    },
    AttackerLockedIn {
        side: Side,
        card: Card,
        position: String,
    },
    DefenderRevealed {
        side: Side,
        card: Card,
    },
    BattleWon {
        side: Side,
        position: String,
    },
    BattleDrawn {
        position: String,
    },
    RegulationWon {
        side: Side,
    },
    ShootoutStarted,
    PenaltyTaken {
        kick: usize,
        side: Side,
        card: Card,
        outcome: PenaltyOutcome,
    },
    SuddenDeathStarted {
        kicks: usize,
    },
    SuddenDeathKick {
        round: u32,
        side: Side,
        card: Card,
        outcome: PenaltyOutcome,
    },
    SuddenDeathRoundVoid {
        round: u32,
    },
    ShootoutWon {
        side: Side,
        sudden_death: bool,
    },
    DeckExhausted,
}

impl MatchEvent {
    /// Render the event as a log line.
    #[must_use]
    pub fn describe(&self, names: &SideMap<String>) -> String {
        match self {
            MatchEvent::BattleStarted {
                number,
                position,
                attacker,
            } => format!("Battle {number}: {position}. {} attacks.", names[*attacker]),
            MatchEvent::CardsDealt { substitutes } => {
                format!("Cards dealt face down. {substitutes} substitutes each.")
            }
            MatchEvent::HomeAdvantage => format!(
                "{} (Home Team) has home-ground advantage: reveals first in battles 1 and 2.",
                names[Side::NonDealer]
            ),
            MatchEvent::AttackerRevealed { side, card } => {
                format!("{} reveals {}.", names[*side], card.with_value())
            }
            MatchEvent::SubstituteUsed { side, position } => {
                format!("{} uses a random face-down sub for {position}.", names[*side])
            }
            MatchEvent::AttackerLockedIn {
                side,
                card,
                position,
            } => format!(
                "{} locks in {} for {position}.",
                names[*side],
                card.with_value()
            ),
            MatchEvent::DefenderRevealed { side, card } => {
                format!("{} reveals {}.", names[*side], card.with_value())
            }
            MatchEvent::BattleWon { side, position } => {
                format!("{} wins {position} (+1).", names[*side])
            }
            MatchEvent::BattleDrawn { position } => format!("{position} is a draw."),
            MatchEvent::RegulationWon { side } => format!("{} wins in regulation.", names[*side]),
            MatchEvent::ShootoutStarted => "Full-time tie. Penalty shootout starts.".to_string(),
            MatchEvent::PenaltyTaken {
                kick,
                side,
                card,
                outcome,
            } => format!("Penalty {kick}: {} -> {card} ({outcome}).", names[*side]),
            MatchEvent::SuddenDeathStarted { kicks } => {
                format!("Penalties tied after {kicks} each. Sudden death begins.")
            }
            MatchEvent::SuddenDeathKick {
                round,
                side,
                card,
                outcome,
            } => format!("Sudden {round}: {} -> {card} ({outcome}).", names[*side]),
            MatchEvent::SuddenDeathRoundVoid { round } => {
                format!("Sudden death round {round} has no winner.")
            }
            MatchEvent::ShootoutWon {
                side,
                sudden_death: false,
            } => format!("{} wins on penalties.", names[*side]),
            MatchEvent::ShootoutWon {
                side,
                sudden_death: true,
            } => format!("{} wins on sudden death penalties.", names[*side]),
            MatchEvent::DeckExhausted => "No cards left for sudden death. Match drawn.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn names() -> SideMap<String> {
        SideMap::new(|side| match side {
            Side::NonDealer => "Rovers".to_string(),
            Side::Dealer => "United".to_string(),
        })
    }

    #[test]
    fn test_battle_lines() {
        let names = names();
        let started = MatchEvent::BattleStarted {
            number: 3,
            position: "DEF 2".to_string(),
            attacker: Side::Dealer,
        };
        assert_eq!(started.describe(&names), "Battle 3: DEF 2. United attacks.");

        let revealed = MatchEvent::AttackerRevealed {
            side: Side::NonDealer,
            card: Card::new(Rank::Queen, Suit::Clubs),
        };
        assert_eq!(revealed.describe(&names), "Rovers reveals Q♣ (12).");
    }

    #[test]
    fn test_penalty_lines() {
        let names = names();
        let kick = MatchEvent::PenaltyTaken {
            kick: 2,
            side: Side::Dealer,
            card: Card::new(Rank::Seven, Suit::Hearts),
            outcome: PenaltyOutcome::Woodwork,
        };
        assert_eq!(kick.describe(&names), "Penalty 2: United -> 7♥ (WOODWORK).");

        let won = MatchEvent::ShootoutWon {
            side: Side::NonDealer,
            sudden_death: true,
        };
        assert_eq!(won.describe(&names), "Rovers wins on sudden death penalties.");
    }

    #[test]
    fn test_event_serde() {
        let event = MatchEvent::BattleDrawn {
            position: "GK".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"battle-drawn""#));
        let back: MatchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
