//! Round state: the shared table plus both seats.
//!
//! ## RoundState
//!
//! - `deck`: remaining draw pile, drawn from the front
//! - `floor`: face-up unmatched cards
//! - `current_player`: the seat to act
//! - `players`: both seats, with hands and collected buckets
//!
//! Uses `im` persistent vectors for the pile and floor so cloning a round
//! (for policy look-ahead or a snapshot) is O(1).
//!
//! ## Zone Invariant
//!
//! Every catalog card sits in exactly one place: a hand, the floor, the
//! deck, one collected bucket, or in flight between the two turn phases.
//! `audit_zones` checks this.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{is_genuine, Card, DECK_SIZE};

/// Per-round table state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Draw pile. The front is the next card drawn.
    pub deck: Vector<Card>,

    /// Face-up floor cards.
    pub floor: Vector<Card>,

    /// Seat to act.
    pub current_player: PlayerId,

    pub players: PlayerMap<Player>,
}

impl RoundState {
    /// Create a table with an empty pile and floor. The human seat acts first.
    #[must_use]
    pub fn new(players: PlayerMap<Player>) -> Self {
        Self {
            deck: Vector::new(),
            floor: Vector::new(),
            current_player: PlayerId::HUMAN,
            players,
        }
    }

    /// Draw the top card of the pile.
    pub fn draw(&mut self) -> Option<Card> {
        self.deck.pop_front()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// The seat to act.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Floor cards sharing a month with `card`.
    pub fn floor_matches<'a>(&'a self, card: &'a Card) -> impl Iterator<Item = &'a Card> + 'a {
        self.floor.iter().filter(move |c| c.same_month(card))
    }

    /// Pass the turn to the other seat.
    pub fn pass_turn(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Iterate every card on the table and in both seats' zones.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(self.floor.iter())
            .chain(self.players.iter().flat_map(|(_, p)| p.hand.iter().chain(p.collected.iter())))
    }

    /// Verify every catalog card appears exactly once.
    ///
    /// `in_flight` holds cards removed from their zone but not yet placed,
    /// such as a pending play between the two turn phases.
    pub fn audit_zones(&self, in_flight: &[Card]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for card in self.all_cards().chain(in_flight.iter()) {
            if !is_genuine(card) {
                return Err(GameError::InvalidDeck(format!("{} is not a catalog card", card.id)));
            }
            if !seen.insert(card.id) {
                return Err(GameError::InvalidDeck(format!("{} appears twice", card.id)));
            }
        }
        for (seat, player) in self.players.iter() {
            if !player.collected.is_well_formed() {
                return Err(GameError::InvalidDeck(format!(
                    "{seat} has a card in the wrong collected bucket"
                )));
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(GameError::InvalidDeck(format!(
                "{} of {} cards accounted for",
                seen.len(),
                DECK_SIZE
            )));
        }
        Ok(())
    }
}
