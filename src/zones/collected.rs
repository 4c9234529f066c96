//! Collected-card buckets.
//!
//! Each player keeps captured cards in four disjoint buckets keyed by
//! category. Insertion order is preserved for display, but nothing that
//! scores or compares buckets depends on it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Category};

/// Bonus junk for holding the special animal.
pub const SPECIAL_ANIMAL_JUNK_BONUS: u32 = 2;

/// A player's captured cards, bucketed by category.
///
/// ## Usage
///
/// ```
/// use matgo_engine::cards::{card, CardId, Category};
/// use matgo_engine::zones::CollectedCards;
///
/// let mut collected = CollectedCards::new();
/// collected.add(*card(CardId::new(44)).unwrap()); // double junk
/// collected.add(*card(CardId::new(33)).unwrap()); // special animal
///
/// assert_eq!(collected.bucket(Category::Animal).len(), 1);
/// assert_eq!(collected.effective_junk_count(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedCards {
    bright: Vec<Card>,
    animal: Vec<Card>,
    ribbon: Vec<Card>,
    junk: Vec<Card>,
}

impl CollectedCards {
    /// Create empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the bucket of its category.
    pub fn add(&mut self, card: Card) {
        self.bucket_mut(card.category).push(card);
    }

    /// Add several cards.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.add(card);
        }
    }

    /// Cards in one bucket, in capture order.
    #[must_use]
    pub fn bucket(&self, category: Category) -> &[Card] {
        match category {
            Category::Bright => &self.bright,
            Category::Animal => &self.animal,
            Category::Ribbon => &self.ribbon,
            Category::Junk => &self.junk,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Card> {
        match category {
            Category::Bright => &mut self.bright,
            Category::Animal => &mut self.animal,
            Category::Ribbon => &mut self.ribbon,
            Category::Junk => &mut self.junk,
        }
    }

    /// Total number of cards across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bright.len() + self.animal.len() + self.ribbon.len() + self.junk.len()
    }

    /// Check if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every collected card, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        Category::ALL.into_iter().flat_map(move |cat| self.bucket(cat).iter())
    }

    /// Does every card sit in the bucket of its own category?
    ///
    /// Always true for buckets built with `add`; a decoded snapshot may
    /// not be.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        Category::ALL
            .into_iter()
            .all(|cat| self.bucket(cat).iter().all(|c| c.category == cat))
    }

    /// Check if a card has been collected.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.iter().any(|c| c.id == card)
    }

    /// Does the Animal bucket hold the special animal?
    #[must_use]
    pub fn holds_special_animal(&self) -> bool {
        self.animal.iter().any(|c| c.special_animal)
    }

    /// Junk count used for scoring and junk-bak.
    ///
    /// Double junk counts 2, other junk 1, plus a bonus of 2 when the
    /// special animal sits in the Animal bucket.
    #[must_use]
    pub fn effective_junk_count(&self) -> u32 {
        let base: u32 = self.junk.iter().map(Card::junk_value).sum();
        if self.holds_special_animal() {
            base + SPECIAL_ANIMAL_JUNK_BONUS
        } else {
            base
        }
    }

    /// Remove the junk card a steal would take.
    ///
    /// Prefers the first single junk card; falls back to the first double
    /// junk. Returns `None` when the Junk bucket is empty.
    pub fn take_junk_for_steal(&mut self) -> Option<Card> {
        if self.junk.is_empty() {
            return None;
        }
        let pos = self.junk.iter().position(|c| !c.double_junk).unwrap_or(0);
        Some(self.junk.remove(pos))
    }
}
