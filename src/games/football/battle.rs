//! Battle engine: one position's duel.
//!
//! ```text
//! battle-start --reveal attacker--> battle-subs --advance--> battle-defender
//!      --reveal defender--> battle-result --next battle--> battle-start (n+1)
//! ```
//!
//! Each step checks the current stage and returns `None` without touching
//! the state when it does not match.

use smallvec::smallvec;
use tracing::debug;

use super::event::{MatchEvent, MatchEvents};
use super::state::{Battle, BattleOutcome, MatchState, Stage};
use crate::core::Side;

/// Which side reveals first in a battle.
///
/// The non-dealer attacks battles 1 and 2 (home-ground advantage). From
/// battle 3 on, odd battles go to the dealer and even ones to the non-dealer.
#[must_use]
pub fn attacker_for_battle(number: usize) -> Side {
    if number <= 2 || number % 2 == 0 {
        Side::NonDealer
    } else {
        Side::Dealer
    }
}

/// Substitute cap: one in ordinary battles, the whole pool in the final one.
#[must_use]
pub fn max_subs(final_battle: bool, pool: usize) -> usize {
    if final_battle {
        pool
    } else {
        pool.min(1)
    }
}

/// Open the battle at `state.battle_index` in the start stage.
pub(crate) fn begin_battle(state: &mut MatchState) -> MatchEvent {
    let index = state.battle_index;
    let number = index + 1;
    let attacker = attacker_for_battle(number);
    let final_battle = number == state.positions.len();
    let battle = Battle {
        number,
        position: state.positions[index].clone(),
        attacker,
        subs_used: 0,
        max_subs: max_subs(final_battle, state.players[attacker].subs.len()),
        final_battle,
    };

    debug!(number, ?attacker, max_subs = battle.max_subs, "battle opened");

    let event = MatchEvent::BattleStarted {
        number,
        position: battle.position.clone(),
        attacker,
    };
    state.stage = Stage::BattleStart(battle);
    event
}

/// battle-start -> battle-subs.
pub(crate) fn reveal_attacker(state: &mut MatchState) -> Option<MatchEvents> {
    let Stage::BattleStart(battle) = &state.stage else {
        return None;
    };
    let battle = battle.clone();
    let card = state.players[battle.attacker].lineup[battle.index()];

    let event = MatchEvent::AttackerRevealed {
        side: battle.attacker,
        card,
    };
    state.stage = Stage::BattleSubs(battle);
    Some(smallvec![event])
}

/// Swap the attacker's card for a uniformly random substitute.
///
/// Stays in battle-subs. Applies only while under the battle's cap and the
/// pool is not empty.
pub(crate) fn use_substitute(state: &mut MatchState) -> Option<MatchEvents> {
    let Stage::BattleSubs(battle) = &state.stage else {
        return None;
    };
    let mut battle = battle.clone();
    if battle.subs_left() == 0 || state.players[battle.attacker].subs.is_empty() {
        return None;
    }

    let pool = state.players[battle.attacker].subs.len();
    let pick = state.rng.gen_range_usize(0..pool);
    let attacker = &mut state.players[battle.attacker];
    let sub = attacker.subs.remove(pick);
    let replaced = std::mem::replace(&mut attacker.lineup[battle.index()], sub);
    attacker.benched.push(replaced);
    battle.subs_used += 1;

    debug!(
        number = battle.number,
        subs_used = battle.subs_used,
        remaining = attacker.subs.len(),
        "substitute used"
    );

    let event = MatchEvent::SubstituteUsed {
        side: battle.attacker,
        position: battle.position.clone(),
    };
    state.stage = Stage::BattleSubs(battle);
    Some(smallvec![event])
}

/// battle-subs -> battle-defender, locking in the attacker's card.
pub(crate) fn advance_to_defender(state: &mut MatchState) -> Option<MatchEvents> {
    let Stage::BattleSubs(battle) = &state.stage else {
        return None;
    };
    let battle = battle.clone();
    let card = state.players[battle.attacker].lineup[battle.index()];

    let event = MatchEvent::AttackerLockedIn {
        side: battle.attacker,
        card,
        position: battle.position.clone(),
    };
    state.stage = Stage::BattleDefender(battle);
    Some(smallvec![event])
}

/// battle-defender -> battle-result, scoring the comparison.
pub(crate) fn reveal_defender(state: &mut MatchState) -> Option<MatchEvents> {
    let Stage::BattleDefender(battle) = &state.stage else {
        return None;
    };
    let battle = battle.clone();
    let attacker_card = state.players[battle.attacker].lineup[battle.index()];
    let defender_card = state.players[battle.defender()].lineup[battle.index()];

    let outcome = match attacker_card.value().cmp(&defender_card.value()) {
        std::cmp::Ordering::Greater => BattleOutcome::Won(battle.attacker),
        std::cmp::Ordering::Less => BattleOutcome::Won(battle.defender()),
        std::cmp::Ordering::Equal => BattleOutcome::Drawn,
    };

    let mut events: MatchEvents = smallvec![MatchEvent::DefenderRevealed {
        side: battle.defender(),
        card: defender_card,
    }];
    match outcome {
        BattleOutcome::Won(side) => {
            state.players[side].points += 1;
            events.push(MatchEvent::BattleWon {
                side,
                position: battle.position.clone(),
            });
        }
        BattleOutcome::Drawn => events.push(MatchEvent::BattleDrawn {
            position: battle.position.clone(),
        }),
    }

    debug!(
        number = battle.number,
        attacker = attacker_card.value(),
        defender = defender_card.value(),
        ?outcome,
        "battle resolved"
    );

    state.stage = Stage::BattleResult(battle, outcome);
    Some(events)
}

/// battle-result -> battle-start of the next position.
///
/// Not applied after the final battle; regulation has to be finished instead.
pub(crate) fn next_battle(state: &mut MatchState) -> Option<MatchEvents> {
    match &state.stage {
        Stage::BattleResult(battle, _) if !battle.final_battle => {}
        _ => return None,
    }
    state.battle_index += 1;
    Some(smallvec![begin_battle(state)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacker_alternation() {
        let expected = [
            Side::NonDealer,
            Side::NonDealer,
            Side::Dealer,
            Side::NonDealer,
            Side::Dealer,
            Side::NonDealer,
            Side::Dealer,
            Side::NonDealer,
            Side::Dealer,
            Side::NonDealer,
            Side::Dealer,
        ];
        for (i, side) in expected.iter().enumerate() {
            assert_eq!(attacker_for_battle(i + 1), *side, "battle {}", i + 1);
        }
    }

    #[test]
    fn test_max_subs() {
        assert_eq!(max_subs(false, 3), 1);
        assert_eq!(max_subs(false, 0), 0);
        assert_eq!(max_subs(true, 3), 3);
        assert_eq!(max_subs(true, 2), 2);
        assert_eq!(max_subs(true, 0), 0);
    }
}
