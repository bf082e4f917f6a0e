//! Card/Deck service: the 52-card deck, its shuffle, and dealing.

pub mod card;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
