//! Shuffling and dealing.
//!
//! A deal takes a full 48-card deck and splits it, in order, into the
//! human hand (10), the opponent hand (10), the floor (8) and the draw
//! pile (20). A deal with all four cards of one month on the floor is
//! void (nagari) and is redealt from a fresh shuffle.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::{is_genuine, Card, CARDS_PER_MONTH, CATALOG, DECK_SIZE};
use crate::core::config::{FLOOR_SIZE, HAND_SIZE};
use crate::core::error::{GameError, Result};
use crate::core::GameRng;

/// The four piles of a fresh deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// Human hand, then opponent hand.
    pub hands: [Vec<Card>; 2],
    pub floor: Vec<Card>,
    /// Remaining draw pile, front first.
    pub deck: Vector<Card>,
}

/// A full deck in random order.
#[must_use]
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = CATALOG.to_vec();
    rng.shuffle(&mut deck);
    deck
}

/// Split a full deck into hands, floor and draw pile.
///
/// Rejects anything that is not exactly the 48 catalog cards.
pub fn deal(deck: Vec<Card>) -> Result<Deal> {
    if deck.len() != DECK_SIZE {
        return Err(GameError::InvalidDeck(format!(
            "expected {} cards, got {}",
            DECK_SIZE,
            deck.len()
        )));
    }
    let mut seen = FxHashSet::default();
    for card in &deck {
        if !is_genuine(card) || !seen.insert(card.id) {
            return Err(GameError::InvalidDeck(format!("{} is duplicated or unknown", card.id)));
        }
    }

    let mut rest = deck.into_iter();
    let human: Vec<Card> = rest.by_ref().take(HAND_SIZE).collect();
    let opponent: Vec<Card> = rest.by_ref().take(HAND_SIZE).collect();
    let floor: Vec<Card> = rest.by_ref().take(FLOOR_SIZE).collect();
    let deck: Vector<Card> = rest.collect();

    Ok(Deal {
        hands: [human, opponent],
        floor,
        deck,
    })
}

/// Does the floor hold all four cards of some month?
///
/// ```
/// use matgo_engine::cards::month_cards;
/// use matgo_engine::rules::dealing::is_nagari;
///
/// let mut floor: Vec<_> = month_cards(3).copied().collect();
/// assert!(is_nagari(&floor));
///
/// floor.pop();
/// assert!(!is_nagari(&floor));
/// ```
#[must_use]
pub fn is_nagari(floor: &[Card]) -> bool {
    let mut counts: FxHashMap<u8, usize> = FxHashMap::default();
    for card in floor {
        *counts.entry(card.month).or_insert(0) += 1;
    }
    counts.values().any(|&n| n == CARDS_PER_MONTH)
}

/// Shuffle and deal until the deal is not void.
///
/// Returns the deal and the number of void deals thrown away.
pub fn deal_round(rng: &mut GameRng) -> Result<(Deal, u32)> {
    let mut redeals = 0;
    loop {
        let deal = deal(shuffled_deck(rng))?;
        if !is_nagari(&deal.floor) {
            return Ok((deal, redeals));
        }
        redeals += 1;
        tracing::debug!(attempt = redeals, "nagari: four of a month on the floor, redealing");
    }
}
