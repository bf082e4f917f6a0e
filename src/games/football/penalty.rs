//! Penalty shootout engine.
//!
//! Runs only when regulation ends level.
//!
//! ## Standard phase
//!
//! Each side is dealt `penalty_kicks` cards up front. Kicks alternate,
//! non-dealer first. Only after every pair has been taken are the tallies
//! compared; an early mathematical decision does not end the phase. With
//! zero kicks configured the phase closes level at once.
//!
//! Cards from a closed phase or a void round move to the shootout's spent
//! pile, so they stay accounted for.
//!
//! ## Sudden death
//!
//! Each round draws one fresh card per side from the match deck, non-dealer
//! first. A round where exactly one side scores ends the match. When fewer
//! than two cards remain for a new round, the match is drawn.

use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use tracing::{debug, info};

use super::event::{MatchEvent, MatchEvents};
use super::state::{Decider, MatchOutcome, MatchState, PenaltyKick, Shootout, ShootoutPhase, Stage};
use crate::cards::Card;
use crate::core::error::Result;
use crate::core::{Side, SideMap};
use crate::rules::GameResult;

/// Highest value that misses the target.
pub const MISS_MAX: u8 = 5;

/// Highest value that strikes the frame.
pub const WOODWORK_MAX: u8 = 7;

/// Result of one penalty card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyOutcome {
    /// Value 2..=5.
    Miss,
    /// Value 6..=7. Hits the frame, no goal.
    Woodwork,
    /// Value 8 and above.
    Goal,
}

impl PenaltyOutcome {
    #[must_use]
    pub fn for_card(card: Card) -> Self {
        match card.value() {
            v if v <= MISS_MAX => PenaltyOutcome::Miss,
            v if v <= WOODWORK_MAX => PenaltyOutcome::Woodwork,
            _ => PenaltyOutcome::Goal,
        }
    }

    #[must_use]
    pub fn is_goal(self) -> bool {
        self == PenaltyOutcome::Goal
    }
}

impl std::fmt::Display for PenaltyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PenaltyOutcome::Miss => "MISS",
            PenaltyOutcome::Woodwork => "WOODWORK",
            PenaltyOutcome::Goal => "GOAL",
        };
        f.write_str(label)
    }
}

/// Deal the standard-phase cards and enter the penalty stage.
///
/// Non-dealer's cards are drawn first.
pub(crate) fn start_shootout(state: &mut MatchState) -> Result<MatchEvents> {
    let kicks = state.config.penalty_kicks;
    let mut cards: SideMap<Vec<Card>> = SideMap::with_default();
    cards[Side::NonDealer] = state.deck.draw_many(kicks)?;
    cards[Side::Dealer] = state.deck.draw_many(kicks)?;

    info!(kicks, remaining = state.deck.len(), "penalty shootout started");

    let shootout = Shootout {
        phase: ShootoutPhase::Standard { kick: 0, cards },
        side: Side::NonDealer,
        goals: SideMap::with_value(0),
        last_kick: None,
        spent: Vec::new(),
    };
    let mut events: MatchEvents = smallvec![MatchEvent::ShootoutStarted];
    if kicks == 0 {
        close_standard_phase(state, shootout, &mut events);
    } else {
        state.stage = Stage::Penalty(shootout);
    }
    Ok(events)
}

/// Reveal the next kicker's card.
pub(crate) fn reveal_next_penalty(state: &mut MatchState) -> Option<MatchEvents> {
    let Stage::Penalty(shootout) = &state.stage else {
        return None;
    };
    let mut shootout = shootout.clone();
    let side = shootout.side;
    let mut events = MatchEvents::new();

    match &mut shootout.phase {
        ShootoutPhase::Standard { kick, cards } => {
            let Some(&card) = cards[side].get(*kick) else {
                return None;
            };
            let outcome = PenaltyOutcome::for_card(card);
            if outcome.is_goal() {
                shootout.goals[side] += 1;
            }
            shootout.last_kick = Some(PenaltyKick {
                side,
                card,
                outcome,
            });
            events.push(MatchEvent::PenaltyTaken {
                kick: *kick + 1,
                side,
                card,
                outcome,
            });

            if side == Side::NonDealer {
                shootout.side = Side::Dealer;
            } else {
                shootout.side = Side::NonDealer;
                *kick += 1;
                if *kick >= state.config.penalty_kicks {
                    close_standard_phase(state, shootout, &mut events);
                    return Some(events);
                }
            }
        }
        ShootoutPhase::SuddenDeath {
            round,
            cards,
            scored,
        } => {
            let round = *round;
            let card = cards[side];
            let outcome = PenaltyOutcome::for_card(card);
            if outcome.is_goal() {
                shootout.goals[side] += 1;
                scored[side] = true;
            }
            shootout.last_kick = Some(PenaltyKick {
                side,
                card,
                outcome,
            });
            events.push(MatchEvent::SuddenDeathKick {
                round,
                side,
                card,
                outcome,
            });

            if side == Side::NonDealer {
                shootout.side = Side::Dealer;
            } else {
                let home = scored[Side::NonDealer];
                let away = scored[Side::Dealer];
                if home != away {
                    let winner = if home { Side::NonDealer } else { Side::Dealer };
                    events.push(MatchEvent::ShootoutWon {
                        side: winner,
                        sudden_death: true,
                    });
                    finish(state, &shootout, GameResult::Winner(winner), Decider::SuddenDeath);
                    return Some(events);
                }

                events.push(MatchEvent::SuddenDeathRoundVoid { round });
                begin_sudden_round(state, shootout, round + 1, &mut events);
                return Some(events);
            }
        }
    }

    state.stage = Stage::Penalty(shootout);
    Some(events)
}

/// All standard kicks taken: decide, or go to sudden death.
fn close_standard_phase(state: &mut MatchState, shootout: Shootout, events: &mut MatchEvents) {
    let home = shootout.goals[Side::NonDealer];
    let away = shootout.goals[Side::Dealer];

    if home != away {
        let winner = if home > away { Side::NonDealer } else { Side::Dealer };
        events.push(MatchEvent::ShootoutWon {
            side: winner,
            sudden_death: false,
        });
        finish(state, &shootout, GameResult::Winner(winner), Decider::Penalties);
        return;
    }

    events.push(MatchEvent::SuddenDeathStarted {
        kicks: state.config.penalty_kicks,
    });
    begin_sudden_round(state, shootout, 1, events);
}

/// Draw a fresh card per side for `round`, or end drawn if the deck is spent.
fn begin_sudden_round(
    state: &mut MatchState,
    mut shootout: Shootout,
    round: u32,
    events: &mut MatchEvents,
) {
    shootout.retire_phase_cards();
    let Ok(drawn) = state.deck.draw_many(2) else {
        events.push(MatchEvent::DeckExhausted);
        finish(state, &shootout, GameResult::Draw, Decider::DeckExhausted);
        return;
    };
    // Top card (last drawn) goes to the non-dealer, who kicks first.
    let (home, away) = (drawn[1], drawn[0]);
    debug!(round, remaining = state.deck.len(), "sudden death round dealt");

    shootout.phase = ShootoutPhase::SuddenDeath {
        round,
        cards: SideMap::new(|side| match side {
            Side::NonDealer => home,
            Side::Dealer => away,
        }),
        scored: SideMap::with_value(false),
    };
    shootout.side = Side::NonDealer;
    state.stage = Stage::Penalty(shootout);
}

fn finish(state: &mut MatchState, shootout: &Shootout, result: GameResult, decided_by: Decider) {
    info!(?result, ?decided_by, goals = ?shootout.goals, "shootout finished");
    state.stage = Stage::Finished(MatchOutcome {
        result,
        decided_by,
        penalty_goals: Some(shootout.goals.clone()),
    });
}
