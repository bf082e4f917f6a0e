//! Match setup: validate input, shuffle, deal, open battle 1.
//!
//! Dealing order is fixed: dealer lineup, non-dealer lineup, dealer subs,
//! non-dealer subs, every draw from the top of the deck.

use smallvec::smallvec;
use tracing::info;

use super::battle;
use super::event::{MatchEvent, MatchEvents};
use super::state::{MatchState, Player};
use crate::cards::Deck;
use crate::core::error::{MatchError, Result};
use crate::core::Side;
use crate::rules::Formation;

/// Start a match on `state`, which must be in the setup stage.
///
/// On error `state` may be partially written; callers work on a copy and
/// drop it.
pub(crate) fn start_match(
    state: &mut MatchState,
    home: &str,
    away: &str,
    formation: &str,
) -> Result<MatchEvents> {
    let home = home.trim();
    let away = away.trim();
    if home.is_empty() {
        return Err(MatchError::EmptyName {
            side: Side::NonDealer,
        });
    }
    if away.is_empty() {
        return Err(MatchError::EmptyName { side: Side::Dealer });
    }
    let formation = Formation::parse(formation)?;

    state.deck = Deck::shuffled(&mut state.rng);
    state.positions = formation.positions();
    state.formation = Some(formation);
    state.battle_index = 0;
    state.log.clear();
    state.players[Side::NonDealer] = Player::named(home);
    state.players[Side::Dealer] = Player::named(away);

    deal(state)?;

    info!(
        home,
        away,
        formation = %formation,
        seed = state.rng.seed(),
        "match started"
    );

    let mut events: MatchEvents = smallvec![battle::begin_battle(state)];
    events.push(MatchEvent::CardsDealt {
        substitutes: state.config.substitutes,
    });
    events.push(MatchEvent::HomeAdvantage);
    Ok(events)
}

/// Deal lineups and substitute pools from the shared deck.
fn deal(state: &mut MatchState) -> Result<()> {
    let lineup_size = state.positions.len();
    let substitutes = state.config.substitutes;

    state.players[Side::Dealer].lineup = state.deck.draw_many(lineup_size)?;
    state.players[Side::NonDealer].lineup = state.deck.draw_many(lineup_size)?;
    state.players[Side::Dealer].subs = state.deck.draw_many(substitutes)?;
    state.players[Side::NonDealer].subs = state.deck.draw_many(substitutes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_SIZE;
    use crate::core::MatchConfig;
    use crate::games::football::state::StageKind;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_start_match_deals_everything() {
        let mut state = MatchState::new(MatchConfig::new(), 42);

        let events = start_match(&mut state, "Rovers", "United", "4-4-2").unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(state.stage().kind(), StageKind::BattleStart);
        assert_eq!(state.positions().len(), 11);
        for side in Side::ALL {
            assert_eq!(state.player(side).lineup.len(), 11);
            assert_eq!(state.player(side).subs.len(), 3);
            assert_eq!(state.player(side).points, 0);
        }
        assert_eq!(state.deck().len(), DECK_SIZE - 28);

        let held: Vec<_> = state.held_cards().collect();
        let unique: FxHashSet<_> = held.iter().copied().collect();
        assert_eq!(held.len(), 28);
        assert_eq!(unique.len(), 28);
        assert!(state.deck().cards().iter().all(|card| !unique.contains(card)));
    }

    #[test]
    fn test_deal_order_takes_from_top() {
        let mut state = MatchState::new(MatchConfig::new(), 9);
        start_match(&mut state, "A", "B", "4-4-2").unwrap();

        // Replay the shuffle with the same seed to know the dealt order
        let mut rng = crate::core::GameRng::new(9);
        let deck = Deck::shuffled(&mut rng);
        let cards = deck.cards();

        assert_eq!(state.player(Side::Dealer).lineup, cards[41..52].to_vec());
        assert_eq!(state.player(Side::NonDealer).lineup, cards[30..41].to_vec());
        assert_eq!(state.player(Side::Dealer).subs, cards[27..30].to_vec());
        assert_eq!(state.player(Side::NonDealer).subs, cards[24..27].to_vec());
    }

    #[test]
    fn test_names_are_trimmed_and_required() {
        let mut state = MatchState::new(MatchConfig::new(), 1);
        assert_eq!(
            start_match(&mut state, "   ", "B", "4-4-2").unwrap_err(),
            MatchError::EmptyName {
                side: Side::NonDealer
            }
        );
        assert_eq!(
            start_match(&mut state, "A", "", "4-4-2").unwrap_err(),
            MatchError::EmptyName { side: Side::Dealer }
        );

        start_match(&mut state, "  A ", "B", "4-4-2").unwrap();
        assert_eq!(state.player(Side::NonDealer).name, "A");
    }

    #[test]
    fn test_oversized_substitute_pool_fails_deal() {
        let mut state = MatchState::new(MatchConfig::new().with_substitutes(20), 1);

        let err = start_match(&mut state, "A", "B", "4-4-2").unwrap_err();

        assert!(matches!(err, MatchError::InsufficientCards { .. }));
        assert!(!err.is_validation());
    }
}
