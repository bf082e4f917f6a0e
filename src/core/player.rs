//! Player roles and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two roles, fixed for its lifetime: the
//! non-dealer (home team) and the dealer (away team).
//!
//! ## SideMap
//!
//! Per-side storage with O(1) access, indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed roles in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Home team. Reveals first in battles 1 and 2 and kicks first in penalties.
    NonDealer,
    /// Away team. Dealt first.
    Dealer,
}

impl Side {
    /// Both sides, home first.
    pub const ALL: [Side; 2] = [Side::NonDealer, Side::Dealer];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::NonDealer => Side::Dealer,
            Side::Dealer => Side::NonDealer,
        }
    }

    /// Presentation label for the role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Side::NonDealer => "Home Team",
            Side::Dealer => "Away Team",
        }
    }

    const fn index(self) -> usize {
        match self {
            Side::NonDealer => 0,
            Side::Dealer => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use card_football::core::{Side, SideMap};
///
/// let mut goals: SideMap<u32> = SideMap::with_default();
/// goals[Side::Dealer] += 1;
///
/// assert_eq!(goals[Side::NonDealer], 0);
/// assert_eq!(goals[Side::Dealer], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::NonDealer), factory(Side::Dealer)],
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (Side, &T) pairs, home first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }

    /// Transform each entry, keeping its side.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, &self[side]))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::NonDealer.opponent(), Side::Dealer);
        assert_eq!(Side::Dealer.opponent(), Side::NonDealer);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Side::NonDealer.to_string(), "Home Team");
        assert_eq!(Side::Dealer.label(), "Away Team");
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|side| side == Side::Dealer);

        assert!(!map[Side::NonDealer]);
        assert!(map[Side::Dealer]);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::NonDealer] = 10;
        map[Side::Dealer] = 20;

        assert_eq!(map[Side::NonDealer], 10);
        assert_eq!(map[Side::Dealer], 20);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map: SideMap<i32> = SideMap::new(|side| if side == Side::NonDealer { 1 } else { 2 });

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::NonDealer, &1), (Side::Dealer, &2)]);
    }

    #[test]
    fn test_side_map_map() {
        let map: SideMap<u32> = SideMap::with_value(3);
        let doubled = map.map(|_, v| v * 2);
        assert_eq!(doubled[Side::Dealer], 6);
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<i32> = SideMap::new(|side| if side == Side::Dealer { 7 } else { 4 });
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
