//! The 48-card catalog.
//!
//! The catalog is static: every game uses the same cards, so there is no
//! registration step. Cards are stored in id order, which makes lookup an
//! index into the array.

use super::definition::{Card, CardId};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 48;

/// Number of cards that share each month.
pub const CARDS_PER_MONTH: usize = 4;

use super::definition::Category::{Animal, Bright, Junk, Ribbon};
use super::definition::RibbonColor::{Blue, Grass, Red};

/// Every card in the game, indexed by `id - 1`.
pub static CATALOG: [Card; DECK_SIZE] = [
    // January - pine
    Card::new(1, 1, Bright),
    Card::new(2, 1, Ribbon).with_ribbon(Red),
    Card::new(3, 1, Junk),
    Card::new(4, 1, Junk),
    // February - plum blossom
    Card::new(5, 2, Animal).seasonal(),
    Card::new(6, 2, Ribbon).with_ribbon(Red),
    Card::new(7, 2, Junk),
    Card::new(8, 2, Junk),
    // March - cherry blossom
    Card::new(9, 3, Bright),
    Card::new(10, 3, Ribbon).with_ribbon(Red),
    Card::new(11, 3, Junk),
    Card::new(12, 3, Junk),
    // April - wisteria
    Card::new(13, 4, Animal).seasonal(),
    Card::new(14, 4, Ribbon).with_ribbon(Grass),
    Card::new(15, 4, Junk),
    Card::new(16, 4, Junk),
    // May - iris
    Card::new(17, 5, Animal),
    Card::new(18, 5, Ribbon).with_ribbon(Grass),
    Card::new(19, 5, Junk),
    Card::new(20, 5, Junk),
    // June - peony
    Card::new(21, 6, Animal),
    Card::new(22, 6, Ribbon).with_ribbon(Blue),
    Card::new(23, 6, Junk),
    Card::new(24, 6, Junk),
    // July - bush clover
    Card::new(25, 7, Animal),
    Card::new(26, 7, Ribbon).with_ribbon(Grass),
    Card::new(27, 7, Junk),
    Card::new(28, 7, Junk),
    // August - pampas grass
    Card::new(29, 8, Bright),
    Card::new(30, 8, Animal).seasonal(),
    Card::new(31, 8, Junk),
    Card::new(32, 8, Junk),
    // September - chrysanthemum
    Card::new(33, 9, Animal).special().with_double_junk(),
    Card::new(34, 9, Ribbon).with_ribbon(Blue),
    Card::new(35, 9, Junk),
    Card::new(36, 9, Junk),
    // October - maple
    Card::new(37, 10, Animal),
    Card::new(38, 10, Ribbon).with_ribbon(Blue),
    Card::new(39, 10, Junk),
    Card::new(40, 10, Junk),
    // November - paulownia
    Card::new(41, 11, Bright),
    Card::new(42, 11, Junk),
    Card::new(43, 11, Junk),
    Card::new(44, 11, Junk).with_double_junk(),
    // December - rain
    Card::new(45, 12, Bright),
    Card::new(46, 12, Animal),
    Card::new(47, 12, Ribbon),
    Card::new(48, 12, Junk).with_double_junk(),
];

/// Look up a card by ID.
///
/// ```
/// use matgo_engine::cards::{card, CardId, Category};
///
/// let rain = card(CardId::new(45)).unwrap();
/// assert_eq!(rain.category, Category::Bright);
/// assert!(card(CardId::new(0)).is_none());
/// ```
#[must_use]
pub fn card(id: CardId) -> Option<&'static Card> {
    (id.raw() as usize)
        .checked_sub(1)
        .and_then(|index| CATALOG.get(index))
}

/// Is this exactly the catalog entry for its id?
///
/// Used when restoring persisted state, which carries full card values.
#[must_use]
pub fn is_genuine(candidate: &Card) -> bool {
    card(candidate.id) == Some(candidate)
}

/// Cards of a given month.
pub fn month_cards(month: u8) -> impl Iterator<Item = &'static Card> {
    CATALOG.iter().filter(move |c| c.month == month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::Category;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_ids_match_positions() {
        for (index, c) in CATALOG.iter().enumerate() {
            assert_eq!(c.id.raw() as usize, index + 1);
        }
    }

    #[test]
    fn test_four_cards_per_month() {
        for month in 1..=12 {
            assert_eq!(month_cards(month).count(), CARDS_PER_MONTH, "month {}", month);
        }
    }

    #[test]
    fn test_category_counts() {
        let count = |cat: Category| CATALOG.iter().filter(|c| c.category == cat).count();

        assert_eq!(count(Bright), 5);
        assert_eq!(count(Animal), 9);
        assert_eq!(count(Ribbon), 10);
        assert_eq!(count(Junk), 24);
    }

    #[test]
    fn test_special_flags() {
        let birds: Vec<_> = CATALOG
            .iter()
            .filter(|c| c.seasonal_animal)
            .map(|c| c.id.raw())
            .collect();
        assert_eq!(birds, vec![5, 13, 30]);

        let special: Vec<_> = CATALOG.iter().filter(|c| c.special_animal).collect();
        assert_eq!(special.len(), 1);
        assert_eq!(special[0].category, Animal);

        for color in [Red, Blue, Grass] {
            assert_eq!(CATALOG.iter().filter(|c| c.ribbon == Some(color)).count(), 3);
        }

        // Exactly one rain Bright
        assert_eq!(CATALOG.iter().filter(|c| c.is_rain_bright()).count(), 1);
    }

    #[test]
    fn test_unique_ids() {
        let ids: FxHashSet<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_lookup_bounds() {
        assert!(card(CardId::new(0)).is_none());
        assert!(card(CardId::new(49)).is_none());
        assert_eq!(card(CardId::new(48)).map(|c| c.month), Some(12));
    }

    #[test]
    fn test_is_genuine() {
        let mut forged = CATALOG[0];
        assert!(is_genuine(&forged));

        forged.category = Junk;
        assert!(!is_genuine(&forged));
    }
}
