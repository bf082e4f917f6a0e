//! The shared 52-card match deck.
//!
//! The top of the deck is the end of the card vector: every draw takes
//! from the end, and `draw_many` keeps the drawn cards in deck order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, Rank, Suit};
use crate::core::error::{MatchError, Result};
use crate::core::rng::GameRng;

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// An ordered pile of cards dealt without replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The 52 cards in suit-major, rank-ascending order.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// A freshly built deck, uniformly shuffled.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut deck = Self::standard();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Wrap an explicit card order (last card is the top).
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return the top `count` cards, preserving their order.
    ///
    /// Fails without touching the deck if fewer than `count` remain.
    pub fn draw_many(&mut self, count: usize) -> Result<Vec<Card>> {
        let remaining = self.cards.len();
        if remaining < count {
            return Err(MatchError::InsufficientCards {
                requested: count,
                remaining,
            });
        }
        debug!(count, remaining, "drawing cards");
        Ok(self.cards.split_off(remaining - count))
    }
}
