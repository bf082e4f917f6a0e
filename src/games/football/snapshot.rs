//! Read-only projection of a match for presentation layers.
//!
//! A `MatchSnapshot` carries exactly what a board may show: face-down cards
//! are `CardView::Hidden` and never leak their value.

use serde::Serialize;

use super::state::{
    Battle, BattleOutcome, Decider, MatchOutcome, MatchState, PenaltyKick, Shootout,
    ShootoutPhase, Stage, StageKind,
};
use crate::cards::Card;
use crate::core::{Side, SideMap};
use crate::rules::GameResult;

/// A card as a viewer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardView {
    Hidden,
    Revealed(Card),
}

impl CardView {
    fn new(card: Option<Card>, revealed: bool) -> Self {
        match card {
            Some(card) if revealed => CardView::Revealed(card),
            _ => CardView::Hidden,
        }
    }

    #[must_use]
    pub fn card(self) -> Option<Card> {
        match self {
            CardView::Revealed(card) => Some(card),
            CardView::Hidden => None,
        }
    }
}

impl std::fmt::Display for CardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardView::Hidden => f.write_str("Face Down"),
            CardView::Revealed(card) => write!(f, "{}", card.with_value()),
        }
    }
}

/// Scoreboard entry for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SideView {
    pub name: String,
    pub label: &'static str,
    pub points: u32,
    pub subs: usize,
}

/// One formation slot with both sides' cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionView {
    pub label: String,
    pub home: CardView,
    pub away: CardView,
}

/// The battle in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleView {
    pub number: usize,
    pub total: usize,
    pub position: String,
    pub attacker: Side,
    pub defender: Side,
    pub attacker_card: CardView,
    pub defender_card: CardView,
    pub subs_used: usize,
    pub max_subs: usize,
    pub subs_left: usize,
    pub final_battle: bool,

    /// Set once the defender has revealed.
    pub result: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenaltyPhaseKind {
    Standard,
    SuddenDeath,
}

/// Shootout progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PenaltyView {
    pub phase: PenaltyPhaseKind,

    /// 1-based kick (standard) or round (sudden death) about to be taken.
    pub number: usize,
    pub to_kick: Side,
    pub goals: SideMap<u32>,
    pub last_kick: Option<PenaltyKick>,
    pub context: String,
}

/// How the match ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeView {
    pub result: GameResult,
    pub decided_by: Decider,
    pub penalty_goals: Option<SideMap<u32>>,
    pub summary: String,
}

/// Everything a presentation layer needs to draw the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub stage: StageKind,

    /// `(n, total)` for the current or last played battle. None before setup.
    pub battle_counter: Option<(usize, usize)>,
    pub sides: SideMap<SideView>,
    pub positions: Vec<PositionView>,
    pub battle: Option<BattleView>,
    pub penalty: Option<PenaltyView>,
    pub outcome: Option<OutcomeView>,

    /// Newest first.
    pub log: Vec<String>,
}

impl MatchSnapshot {
    /// "Rovers 3 - 2 United".
    #[must_use]
    pub fn scoreline(&self) -> String {
        let home = &self.sides[Side::NonDealer];
        let away = &self.sides[Side::Dealer];
        format!("{} {} - {} {}", home.name, home.points, away.points, away.name)
    }
}

impl MatchState {
    /// Project the state into a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        let names = self.names();
        let total = self.positions.len();

        MatchSnapshot {
            stage: self.stage.kind(),
            battle_counter: match self.stage {
                Stage::Setup => None,
                _ => Some((self.battle_index + 1, total)),
            },
            sides: self.players.map(|side, player| SideView {
                name: player.name.clone(),
                label: side.label(),
                points: player.points,
                subs: player.subs.len(),
            }),
            positions: self.position_views(),
            battle: self.stage.battle().map(|battle| self.battle_view(battle, &names)),
            penalty: match &self.stage {
                Stage::Penalty(shootout) => {
                    Some(penalty_view(shootout, &names, self.config.penalty_kicks))
                }
                _ => None,
            },
            outcome: match &self.stage {
                Stage::Finished(outcome) => Some(self.outcome_view(outcome)),
                _ => None,
            },
            log: self.log.iter().map(str::to_string).collect(),
        }
    }

    fn position_views(&self) -> Vec<PositionView> {
        self.positions
            .iter()
            .enumerate()
            .map(|(index, label)| PositionView {
                label: label.clone(),
                home: self.slot_view(Side::NonDealer, index),
                away: self.slot_view(Side::Dealer, index),
            })
            .collect()
    }

    fn slot_view(&self, side: Side, index: usize) -> CardView {
        let card = self.players[side].lineup.get(index).copied();
        let revealed = match &self.stage {
            Stage::Setup => false,
            Stage::Penalty(_) | Stage::Finished(_) => true,
            stage => match stage.battle() {
                Some(battle) if index == battle.index() => {
                    if side == battle.attacker {
                        stage.attacker_revealed()
                    } else {
                        stage.defender_revealed()
                    }
                }
                _ => index < self.battle_index,
            },
        };
        CardView::new(card, revealed)
    }

    fn battle_view(&self, battle: &Battle, names: &SideMap<String>) -> BattleView {
        let cards = self.battle_cards();
        let result = match &self.stage {
            Stage::BattleResult(_, BattleOutcome::Won(side)) => {
                Some(format!("{} wins {} (+1).", names[*side], battle.position))
            }
            Stage::BattleResult(_, BattleOutcome::Drawn) => {
                Some(format!("{} is a draw.", battle.position))
            }
            _ => None,
        };

        BattleView {
            number: battle.number,
            total: self.positions.len(),
            position: battle.position.clone(),
            attacker: battle.attacker,
            defender: battle.defender(),
            attacker_card: CardView::new(cards.map(|c| c.0), self.stage.attacker_revealed()),
            defender_card: CardView::new(cards.map(|c| c.1), self.stage.defender_revealed()),
            subs_used: battle.subs_used,
            max_subs: battle.max_subs,
            subs_left: battle.subs_left(),
            final_battle: battle.final_battle,
            result,
        }
    }

    fn outcome_view(&self, outcome: &MatchOutcome) -> OutcomeView {
        let home = &self.players[Side::NonDealer];
        let away = &self.players[Side::Dealer];
        let summary = match outcome.result {
            GameResult::Winner(Side::NonDealer) => format!(
                "{} wins. Final score {}-{}.",
                home.name, home.points, away.points
            ),
            GameResult::Winner(Side::Dealer) => format!(
                "{} wins. Final score {}-{}.",
                away.name, away.points, home.points
            ),
            GameResult::Draw => format!(
                "Match drawn. Final score {}-{}.",
                home.points, away.points
            ),
        };

        OutcomeView {
            result: outcome.result,
            decided_by: outcome.decided_by,
            penalty_goals: outcome.penalty_goals.clone(),
            summary,
        }
    }
}

fn penalty_view(shootout: &Shootout, names: &SideMap<String>, kicks: usize) -> PenaltyView {
    let kicker = &names[shootout.side];
    let (phase, number, context) = match &shootout.phase {
        ShootoutPhase::Standard { kick, .. } => (
            PenaltyPhaseKind::Standard,
            kick + 1,
            format!("Kick {} of {kicks}: {kicker} to reveal.", kick + 1),
        ),
        ShootoutPhase::SuddenDeath { round, .. } => (
            PenaltyPhaseKind::SuddenDeath,
            *round as usize,
            format!("Sudden Death Round {round}: {kicker} to reveal."),
        ),
    };

    PenaltyView {
        phase,
        number,
        to_kick: shootout.side,
        goals: shootout.goals.clone(),
        last_kick: shootout.last_kick,
        context,
    }
}
