//! Match state: the authoritative record of a match.
//!
//! ## Stage
//!
//! The match is always in exactly one `Stage`. Each battle stage carries the
//! `Battle` being played; the penalty stage carries the `Shootout`; the
//! finished stage carries the `MatchOutcome`. Which cards are face up is
//! implied by the stage rather than stored in flags.
//!
//! ## MatchState
//!
//! Owns the deck, both players, the position list, the log, the action
//! history and the RNG. Cloning a `MatchState` yields a fully independent
//! copy including its random stream.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::penalty::PenaltyOutcome;
use crate::cards::{Card, Deck};
use crate::core::{ActionRecord, GameRng, GameRngState, MatchConfig, MatchLog, Side, SideMap};
use crate::rules::{Formation, GameResult};

/// One side's team sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,

    /// Battles won.
    pub points: u32,

    /// One card per position slot.
    pub lineup: Vec<Card>,

    /// Face-down substitute pool.
    pub subs: Vec<Card>,

    /// Lineup cards replaced by a substitute.
    pub benched: Vec<Card>,
}

impl Player {
    /// A player with a name and nothing dealt yet.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The duel for one position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    /// 1-based battle number.
    pub number: usize,

    /// Position label for this battle.
    pub position: String,

    /// The side revealing first.
    pub attacker: Side,

    /// Substitutes used by the attacker in this battle.
    pub subs_used: usize,

    /// Cap on substitutes for this battle.
    pub max_subs: usize,

    /// True for the last position in the formation.
    pub final_battle: bool,
}

impl Battle {
    /// The side revealing second.
    #[must_use]
    pub fn defender(&self) -> Side {
        self.attacker.opponent()
    }

    /// Lineup slot index for this battle.
    #[must_use]
    pub fn index(&self) -> usize {
        self.number - 1
    }

    /// Substitutes the attacker may still use in this battle.
    #[must_use]
    pub fn subs_left(&self) -> usize {
        self.max_subs.saturating_sub(self.subs_used)
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// This side took the point.
    Won(Side),
    /// Equal values, no point.
    Drawn,
}

impl BattleOutcome {
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            BattleOutcome::Won(side) => Some(side),
            BattleOutcome::Drawn => None,
        }
    }
}

/// A revealed penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyKick {
    pub side: Side,
    pub card: Card,
    pub outcome: PenaltyOutcome,
}

/// Shootout phase with the data valid in it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShootoutPhase {
    /// Pre-dealt kicks, `kick` is the 0-based pair index.
    Standard {
        kick: usize,
        cards: SideMap<Vec<Card>>,
    },
    /// One fresh card per side per round, `round` is 1-based.
    SuddenDeath {
        round: u32,
        cards: SideMap<Card>,
        scored: SideMap<bool>,
    },
}

/// Penalty shootout in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shootout {
    pub phase: ShootoutPhase,

    /// The side to reveal next.
    pub side: Side,

    /// Goals across both phases.
    pub goals: SideMap<u32>,

    /// Most recently revealed kick.
    pub last_kick: Option<PenaltyKick>,

    /// Cards from the standard phase and void sudden-death rounds.
    pub spent: Vec<Card>,
}

impl Shootout {
    /// Cards dealt for the current phase or round.
    #[must_use]
    pub fn phase_cards(&self) -> Vec<Card> {
        match &self.phase {
            ShootoutPhase::Standard { cards, .. } => cards
                .iter()
                .flat_map(|(_, cards)| cards.iter().copied())
                .collect(),
            ShootoutPhase::SuddenDeath { cards, .. } => {
                cards.iter().map(|(_, card)| *card).collect()
            }
        }
    }

    /// Move the current phase's cards onto the spent pile.
    pub(crate) fn retire_phase_cards(&mut self) {
        let cards = self.phase_cards();
        self.spent.extend(cards);
    }
}

/// What settled the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decider {
    Regulation,
    Penalties,
    SuddenDeath,
    DeckExhausted,
}

/// Final result of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub result: GameResult,
    pub decided_by: Decider,

    /// Shootout goals, when a shootout was played.
    pub penalty_goals: Option<SideMap<u32>>,
}

/// The match state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Setup,
    BattleStart(Battle),
    BattleSubs(Battle),
    BattleDefender(Battle),
    BattleResult(Battle, BattleOutcome),
    Penalty(Shootout),
    Finished(MatchOutcome),
}

/// Field-free stage tag, for snapshots and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    Setup,
    BattleStart,
    BattleSubs,
    BattleDefender,
    BattleResult,
    Penalty,
    Finished,
}

impl Stage {
    #[must_use]
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Setup => StageKind::Setup,
            Stage::BattleStart(_) => StageKind::BattleStart,
            Stage::BattleSubs(_) => StageKind::BattleSubs,
            Stage::BattleDefender(_) => StageKind::BattleDefender,
            Stage::BattleResult(..) => StageKind::BattleResult,
            Stage::Penalty(_) => StageKind::Penalty,
            Stage::Finished(_) => StageKind::Finished,
        }
    }

    /// The battle in progress, in any battle stage.
    #[must_use]
    pub fn battle(&self) -> Option<&Battle> {
        match self {
            Stage::BattleStart(battle)
            | Stage::BattleSubs(battle)
            | Stage::BattleDefender(battle)
            | Stage::BattleResult(battle, _) => Some(battle),
            _ => None,
        }
    }

    /// Attacker's card is face up from the substitution step on.
    #[must_use]
    pub fn attacker_revealed(&self) -> bool {
        matches!(
            self,
            Stage::BattleSubs(_) | Stage::BattleDefender(_) | Stage::BattleResult(..)
        )
    }

    /// Defender's card is face up once the battle is resolved.
    #[must_use]
    pub fn defender_revealed(&self) -> bool {
        matches!(self, Stage::BattleResult(..))
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageKind::Setup => "setup",
            StageKind::BattleStart => "battle-start",
            StageKind::BattleSubs => "battle-subs",
            StageKind::BattleDefender => "battle-defender",
            StageKind::BattleResult => "battle-result",
            StageKind::Penalty => "penalty",
            StageKind::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Complete match state.
#[derive(Clone, Debug)]
pub struct MatchState {
    pub(crate) config: MatchConfig,
    pub(crate) rng: GameRng,
    pub(crate) deck: Deck,
    pub(crate) formation: Option<Formation>,
    pub(crate) positions: Vec<String>,
    pub(crate) players: SideMap<Player>,
    pub(crate) battle_index: usize,
    pub(crate) stage: Stage,
    pub(crate) log: MatchLog,
    pub(crate) history: Vector<ActionRecord>,
}

impl MatchState {
    /// A state waiting for setup.
    #[must_use]
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        let log = MatchLog::new(config.log_capacity);
        Self {
            config,
            rng: GameRng::new(seed),
            deck: Deck::default(),
            formation: None,
            positions: Vec::new(),
            players: SideMap::with_default(),
            battle_index: 0,
            stage: Stage::Setup,
            log,
            history: Vector::new(),
        }
    }

    /// Return to setup, keeping configuration, history and the random stream.
    pub(crate) fn clear_match(&mut self) {
        self.deck = Deck::default();
        self.formation = None;
        self.positions.clear();
        self.players = SideMap::with_default();
        self.battle_index = 0;
        self.stage = Stage::Setup;
        self.log.clear();
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn formation(&self) -> Option<&Formation> {
        self.formation.as_ref()
    }

    #[must_use]
    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side]
    }

    /// Display names of both sides.
    #[must_use]
    pub fn names(&self) -> SideMap<String> {
        self.players.map(|_, player| player.name.clone())
    }

    #[must_use]
    pub fn points(&self, side: Side) -> u32 {
        self.players[side].points
    }

    /// 0-based index of the current (or last played) battle.
    #[must_use]
    pub fn battle_index(&self) -> usize {
        self.battle_index
    }

    #[must_use]
    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    /// Applied actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Checkpoint of the random stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Attacker and defender cards for the battle in progress.
    #[must_use]
    pub fn battle_cards(&self) -> Option<(Card, Card)> {
        let battle = self.stage.battle()?;
        let attacker = *self.players[battle.attacker].lineup.get(battle.index())?;
        let defender = *self.players[battle.defender()].lineup.get(battle.index())?;
        Some((attacker, defender))
    }

    /// Every card dealt out of the deck and still in play.
    ///
    /// Lineups, substitute pools, benched cards, the current shootout cards
    /// and the spent shootout pile. Together with the deck these account for
    /// all 52 cards until the match finishes.
    pub fn held_cards(&self) -> impl Iterator<Item = Card> + '_ {
        let players = self.players.iter().flat_map(|(_, p)| {
            p.lineup
                .iter()
                .chain(p.subs.iter())
                .chain(p.benched.iter())
                .copied()
        });

        let shootout = match &self.stage {
            Stage::Penalty(shootout) => Some(shootout),
            _ => None,
        };
        let shootout = shootout.into_iter().flat_map(|shootout| {
            shootout
                .phase_cards()
                .into_iter()
                .chain(shootout.spent.iter().copied())
        });

        players.chain(shootout)
    }

    /// Count the cards in the deck and in play, or `None` if any card is in
    /// two places at once.
    #[must_use]
    pub fn distinct_cards(&self) -> Option<usize> {
        let mut seen = FxHashSet::default();
        for card in self.deck.cards().iter().copied().chain(self.held_cards()) {
            if !seen.insert(card) {
                return None;
            }
        }
        Some(seen.len())
    }

    // === Fixtures ===
    //
    // Direct setters for building forced scenarios. They do not log or
    // validate and are meant for tests and tooling.

    /// Replace the remaining deck.
    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    /// Replace a side's lineup.
    pub fn set_lineup(&mut self, side: Side, lineup: Vec<Card>) {
        self.players[side].lineup = lineup;
    }

    /// Replace a side's substitute pool.
    pub fn set_subs(&mut self, side: Side, subs: Vec<Card>) {
        self.players[side].subs = subs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle(number: usize, attacker: Side) -> Battle {
        Battle {
            number,
            position: "GK".to_string(),
            attacker,
            subs_used: 0,
            max_subs: 1,
            final_battle: false,
        }
    }

    #[test]
    fn test_new_state_is_setup() {
        let state = MatchState::new(MatchConfig::new(), 42);

        assert_eq!(state.stage().kind(), StageKind::Setup);
        assert!(state.deck().is_empty());
        assert!(state.positions().is_empty());
        assert_eq!(state.log().capacity(), 140);
        assert!(state.history().is_empty());
        assert!(state.battle_cards().is_none());
    }

    #[test]
    fn test_reveal_flags_follow_stage() {
        let b = battle(1, Side::NonDealer);

        assert!(!Stage::BattleStart(b.clone()).attacker_revealed());
        assert!(Stage::BattleSubs(b.clone()).attacker_revealed());
        assert!(!Stage::BattleDefender(b.clone()).defender_revealed());
        assert!(Stage::BattleResult(b, BattleOutcome::Drawn).defender_revealed());
    }

    #[test]
    fn test_battle_helpers() {
        let mut b = battle(4, Side::Dealer);
        assert_eq!(b.defender(), Side::NonDealer);
        assert_eq!(b.index(), 3);
        assert_eq!(b.subs_left(), 1);

        b.subs_used = 1;
        assert_eq!(b.subs_left(), 0);
    }

    #[test]
    fn test_stage_kind_display() {
        assert_eq!(StageKind::BattleDefender.to_string(), "battle-defender");
        assert_eq!(Stage::Setup.kind().to_string(), "setup");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = MatchState::new(MatchConfig::new(), 1);
        state.set_deck(Deck::standard());
        let before = state.clone();

        state.deck.draw_many(10).unwrap();

        assert_eq!(before.deck().len(), 52);
        assert_eq!(state.deck().len(), 42);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(BattleOutcome::Won(Side::Dealer).winner(), Some(Side::Dealer));
        assert_eq!(BattleOutcome::Drawn.winner(), None);
    }
}
