//! Match controller.
//!
//! `FootballRules` sequences a match: setup, one battle per position in
//! formation order, the end of regulation, and the shootout when the
//! scores are level. It is the single entry point for actions.

use smallvec::smallvec;
use tracing::{debug, info, warn};

use super::event::{MatchEvent, MatchEvents};
use super::state::{Decider, MatchOutcome, MatchState, Stage};
use super::{battle, penalty, setup};
use crate::core::error::Result;
use crate::core::{Action, ActionRecord, MatchConfig, Side};
use crate::rules::{GameResult, RulesEngine, Transition};

/// Transition produced by [`FootballRules`].
pub type MatchTransition = Transition<MatchState, MatchEvent>;

/// The football card match rules.
#[derive(Clone, Debug, Default)]
pub struct FootballRules {
    config: MatchConfig,
}

impl FootballRules {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// A fresh state waiting for setup, with its random stream seeded.
    #[must_use]
    pub fn new_match(&self, seed: u64) -> MatchState {
        MatchState::new(self.config.clone(), seed)
    }

    /// Rebuild a match by replaying actions from a seed.
    ///
    /// Actions that do not fit their stage are skipped, as they would be live.
    pub fn replay<'a>(
        &self,
        seed: u64,
        actions: impl IntoIterator<Item = &'a Action>,
    ) -> Result<MatchState> {
        actions
            .into_iter()
            .try_fold(self.new_match(seed), |state, action| {
                self.apply_action(&state, action).map(|t| t.state)
            })
    }

    /// The step an automatic player takes: never substitutes, never resets.
    #[must_use]
    pub fn auto_action(&self, state: &MatchState) -> Option<Action> {
        self.legal_actions(state)
            .into_iter()
            .find(|action| !matches!(action, Action::UseSubstitute | Action::Reset))
    }
}

impl RulesEngine for FootballRules {
    type State = MatchState;
    type Event = MatchEvent;

    fn legal_actions(&self, state: &MatchState) -> Vec<Action> {
        let mut actions = match state.stage() {
            Stage::Setup => return Vec::new(),
            Stage::BattleStart(_) => vec![Action::RevealAttacker],
            Stage::BattleSubs(battle) => {
                let mut actions = Vec::new();
                if battle.subs_left() > 0 && !state.player(battle.attacker).subs.is_empty() {
                    actions.push(Action::UseSubstitute);
                }
                actions.push(Action::AdvanceToDefender);
                actions
            }
            Stage::BattleDefender(_) => vec![Action::RevealDefender],
            Stage::BattleResult(battle, _) if battle.final_battle => vec![Action::FinishRegulation],
            Stage::BattleResult(..) => vec![Action::NextBattle],
            Stage::Penalty(_) => vec![Action::RevealNextPenalty],
            Stage::Finished(_) => Vec::new(),
        };
        actions.push(Action::Reset);
        actions
    }

    fn apply_action(&self, state: &MatchState, action: &Action) -> Result<MatchTransition> {
        let mut next = state.clone();

        let events = match action {
            Action::Setup {
                home,
                away,
                formation,
            } => match next.stage {
                Stage::Setup => match setup::start_match(&mut next, home, away, formation) {
                    Ok(events) => Some(events),
                    Err(err) => {
                        warn!(%err, "setup rejected");
                        return Err(err);
                    }
                },
                _ => None,
            },
            Action::RevealAttacker => battle::reveal_attacker(&mut next),
            Action::UseSubstitute => battle::use_substitute(&mut next),
            Action::AdvanceToDefender => battle::advance_to_defender(&mut next),
            Action::RevealDefender => battle::reveal_defender(&mut next),
            Action::NextBattle => battle::next_battle(&mut next),
            Action::FinishRegulation => finish_regulation(&mut next).transpose()?,
            Action::RevealNextPenalty => penalty::reveal_next_penalty(&mut next),
            Action::Reset => reset(&mut next),
        };

        let Some(events) = events else {
            debug!(action = %action, stage = %state.stage().kind(), "action ignored");
            return Ok(Transition::ignored(state.clone()));
        };

        let names = next.names();
        for event in &events {
            next.log.push(event.describe(&names));
        }
        let sequence = next.history.len();
        next.history.push_back(ActionRecord::new(sequence, action.clone()));

        debug!(
            action = %action,
            sequence,
            stage = %next.stage().kind(),
            events = events.len(),
            "action applied"
        );
        let newly_finished = !matches!(state.stage, Stage::Finished(_));
        if let (Stage::Finished(outcome), true) = (&next.stage, newly_finished) {
            info!(
                result = ?outcome.result,
                decided_by = ?outcome.decided_by,
                home = next.points(Side::NonDealer),
                away = next.points(Side::Dealer),
                "match finished"
            );
        }

        Ok(Transition::applied(next, events))
    }

    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        match state.stage() {
            Stage::Finished(outcome) => Some(outcome.result),
            _ => None,
        }
    }
}

/// Close regulation after the final battle.
///
/// A points leader wins outright; level scores go to penalties. Fails only
/// if the deck cannot cover the standard-phase penalty cards.
fn finish_regulation(state: &mut MatchState) -> Option<Result<MatchEvents>> {
    match &state.stage {
        Stage::BattleResult(battle, _) if battle.final_battle => {}
        _ => return None,
    }

    let home = state.points(Side::NonDealer);
    let away = state.points(Side::Dealer);
    info!(home, away, "regulation over");

    if home == away {
        return Some(penalty::start_shootout(state));
    }

    let winner = if home > away { Side::NonDealer } else { Side::Dealer };
    state.stage = Stage::Finished(MatchOutcome {
        result: GameResult::Winner(winner),
        decided_by: Decider::Regulation,
        penalty_goals: None,
    });
    Some(Ok(smallvec![MatchEvent::RegulationWon { side: winner }]))
}

/// Abandon the match and return to setup.
fn reset(state: &mut MatchState) -> Option<MatchEvents> {
    if matches!(state.stage, Stage::Setup) {
        return None;
    }
    state.clear_match();
    Some(MatchEvents::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::football::state::StageKind;

    fn started(seed: u64) -> (FootballRules, MatchState) {
        let rules = FootballRules::default();
        let state = rules.new_match(seed);
        let state = rules
            .apply_action(&state, &Action::setup("Rovers", "United", "4-4-2"))
            .unwrap()
            .state;
        (rules, state)
    }

    #[test]
    fn test_setup_transition() {
        let rules = FootballRules::default();
        let before = rules.new_match(42);

        let transition = rules
            .apply_action(&before, &Action::setup("Rovers", "United", "4-4-2"))
            .unwrap();

        assert!(transition.applied);
        assert_eq!(transition.events.len(), 3);
        assert_eq!(transition.state.stage().kind(), StageKind::BattleStart);
        assert_eq!(transition.state.log().len(), 3);
        assert_eq!(
            transition.state.log().iter().last(),
            Some("Battle 1: GK. Rovers attacks.")
        );
        assert_eq!(transition.state.history().len(), 1);

        // Input untouched
        assert_eq!(before.stage().kind(), StageKind::Setup);
        assert!(before.log().is_empty());
    }

    #[test]
    fn test_failed_setup_leaves_state_alone() {
        let rules = FootballRules::default();
        let before = rules.new_match(42);

        let err = rules
            .apply_action(&before, &Action::setup("Rovers", "United", "4-4-3"))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(before.stage().kind(), StageKind::Setup);
        assert_eq!(before.rng_state(), rules.new_match(42).rng_state());
    }

    #[test]
    fn test_setup_ignored_once_started() {
        let (rules, state) = started(1);

        let transition = rules
            .apply_action(&state, &Action::setup("X", "Y", "3-5-2"))
            .unwrap();

        assert!(!transition.applied);
        assert_eq!(transition.state.player(Side::NonDealer).name, "Rovers");
    }

    #[test]
    fn test_legal_actions_by_stage() {
        let (rules, state) = started(3);
        assert!(rules.legal_actions(&rules.new_match(3)).is_empty());
        assert_eq!(
            rules.legal_actions(&state),
            vec![Action::RevealAttacker, Action::Reset]
        );

        let state = rules.apply_action(&state, &Action::RevealAttacker).unwrap().state;
        assert_eq!(
            rules.legal_actions(&state),
            vec![Action::UseSubstitute, Action::AdvanceToDefender, Action::Reset]
        );
        assert!(rules.is_legal(&state, &Action::AdvanceToDefender));
        assert!(!rules.is_legal(&state, &Action::RevealDefender));
    }

    #[test]
    fn test_reset_returns_to_setup() {
        let (rules, state) = started(5);

        let transition = rules.apply_action(&state, &Action::Reset).unwrap();

        assert!(transition.applied);
        assert_eq!(transition.state.stage().kind(), StageKind::Setup);
        assert!(transition.state.log().is_empty());
        assert!(transition.state.deck().is_empty());
        assert_eq!(transition.state.history().len(), 2);

        let again = rules.apply_action(&transition.state, &Action::Reset).unwrap();
        assert!(!again.applied);
    }

    #[test]
    fn test_auto_action_skips_substitutes() {
        let (rules, state) = started(8);
        let state = rules.apply_action(&state, &Action::RevealAttacker).unwrap().state;

        assert_eq!(rules.auto_action(&state), Some(Action::AdvanceToDefender));
        assert_eq!(rules.auto_action(&rules.new_match(8)), None);
    }
}
