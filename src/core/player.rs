//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Positional seat identifier: seat 0 is the human slot, seat 1 the
//! opponent slot. Seats say nothing about identity; the tournament maps
//! seats to bracket participants.
//!
//! ## PlayerMap
//!
//! Fixed two-seat storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Everything the round engine tracks for one seat: capital, hand,
//! collected buckets and the go / go-bak bookkeeping.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::{Card, CardId};
use crate::rules::scoring::ScoredSet;
use crate::zones::CollectedCards;

/// Number of seats in a round.
pub const SEATS: usize = 2;

/// Seat identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The human slot.
    pub const HUMAN: PlayerId = PlayerId(0);

    /// The opponent slot.
    pub const OPPONENT: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Both seats, human first.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::HUMAN, Self::OPPONENT].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use matgo_engine::core::{PlayerId, PlayerMap};
///
/// let mut captures: PlayerMap<u32> = PlayerMap::with_value(0);
/// captures[PlayerId::OPPONENT] += 2;
///
/// assert_eq!(captures[PlayerId::HUMAN], 0);
/// assert_eq!(captures[PlayerId::OPPONENT], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEATS],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::HUMAN), factory(PlayerId::OPPONENT)],
        }
    }

    /// Create a map from the two seat values.
    pub fn from_pair(human: T, opponent: T) -> Self {
        Self {
            data: [human, opponent],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Mutable references to a seat and the other seat at once.
    pub fn pair_mut(&mut self, player: PlayerId) -> (&mut T, &mut T) {
        let [human, opponent] = &mut self.data;
        if player == PlayerId::HUMAN {
            (human, opponent)
        } else {
            (opponent, human)
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Consume into the (human, opponent) pair.
    pub fn into_pair(self) -> (T, T) {
        let [human, opponent] = self.data;
        (human, opponent)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One seat's state.
///
/// `capital` persists across rounds; everything else is per round and is
/// cleared by `reset_for_round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Signed currency. May go negative before the bankruptcy check.
    pub capital: i64,

    pub hand: Vec<Card>,

    pub collected: CollectedCards,

    /// Running score for the current round.
    pub score: u32,

    /// Number of times this player called go this round.
    pub go_count: u32,

    /// Set once the other player has called go against this player.
    pub is_go_bak: bool,

    /// Scoring sets achieved so far, for highlighting. Derived from `collected`.
    pub achieved_sets: Vec<ScoredSet>,
}

impl Player {
    /// Create a player with empty zones.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, capital: i64) -> Self {
        Self {
            id,
            name: name.into(),
            capital,
            hand: Vec::new(),
            collected: CollectedCards::new(),
            score: 0,
            go_count: 0,
            is_go_bak: false,
            achieved_sets: Vec::new(),
        }
    }

    /// Clear all per-round state, keeping identity and capital.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.collected = CollectedCards::new();
        self.score = 0;
        self.go_count = 0;
        self.is_go_bak = false;
        self.achieved_sets.clear();
    }

    /// Is the card in this player's hand?
    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand.iter().any(|c| c.id == card)
    }

    /// Find a card in hand.
    #[must_use]
    pub fn hand_card(&self, card: CardId) -> Option<Card> {
        self.hand.iter().find(|c| c.id == card).copied()
    }

    /// Remove a card from hand.
    ///
    /// Returns the card if it was found and removed.
    pub fn remove_from_hand(&mut self, card: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == card)?;
        Some(self.hand.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Category, CATALOG};

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::HUMAN.index(), 0);
        assert_eq!(PlayerId::OPPONENT.index(), 1);
        assert_eq!(PlayerId::HUMAN.other(), PlayerId::OPPONENT);
        assert_eq!(PlayerId::OPPONENT.other(), PlayerId::HUMAN);
        assert_eq!(format!("{}", PlayerId::HUMAN), "Player 0");

        let seats: Vec<_> = PlayerId::all().collect();
        assert_eq!(seats, vec![PlayerId::HUMAN, PlayerId::OPPONENT]);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);

        assert_eq!(map[PlayerId::HUMAN], 0);
        assert_eq!(map[PlayerId::OPPONENT], 10);
    }

    #[test]
    fn test_player_map_pair_mut() {
        let mut map = PlayerMap::from_pair(1, 2);

        let (me, other) = map.pair_mut(PlayerId::OPPONENT);
        assert_eq!((*me, *other), (2, 1));
        *me += 10;
        *other += 100;

        assert_eq!(map.into_pair(), (101, 12));
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::from_pair(3i64, -4i64);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_hand_management() {
        let mut player = Player::new(PlayerId::HUMAN, "Challenger", 50_000);
        player.hand = CATALOG[..3].to_vec();

        assert!(player.holds(CardId::new(2)));
        assert_eq!(player.remove_from_hand(CardId::new(2)).map(|c| c.id), Some(CardId::new(2)));
        assert!(!player.holds(CardId::new(2)));
        assert_eq!(player.remove_from_hand(CardId::new(2)), None);
        assert_eq!(player.hand.len(), 2);
    }

    #[test]
    fn test_reset_keeps_capital() {
        let mut player = Player::new(PlayerId::OPPONENT, "Rival", 75_000);
        player.hand = CATALOG[..2].to_vec();
        player.collected.add(CATALOG[2]);
        player.score = 9;
        player.go_count = 2;
        player.is_go_bak = true;

        player.reset_for_round();

        assert_eq!(player.capital, 75_000);
        assert!(player.hand.is_empty());
        assert_eq!(player.collected.bucket(Category::Junk).len(), 0);
        assert_eq!(player.score, 0);
        assert_eq!(player.go_count, 0);
        assert!(!player.is_go_bak);
    }
}
