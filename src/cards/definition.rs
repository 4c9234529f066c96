//! Card definitions - static card data.
//!
//! A `Card` is the immutable description of one of the 48 hwatu cards:
//! its month, its category and the handful of flags that scoring cares
//! about. Cards never change during a game; they only move between zones
//! (hand, floor, draw pile, collected buckets).

use serde::{Deserialize, Serialize};

/// Month of the rain cards. The rain Bright weakens a three-Bright set.
pub const RAIN_MONTH: u8 = 12;

/// Unique, stable identifier for a card (1..=48).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category. Traditionally Gwang / Yul / Tti / Pi.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bright,
    Animal,
    Ribbon,
    Junk,
}

impl Category {
    /// All categories, in collected-bucket order.
    pub const ALL: [Category; 4] = [
        Category::Bright,
        Category::Animal,
        Category::Ribbon,
        Category::Junk,
    ];
}

/// Ribbon colour. Only Ribbon cards carry one, and the rain ribbon has none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RibbonColor {
    Red,
    Blue,
    Grass,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use matgo_engine::cards::{Card, CardId, Category, RibbonColor};
///
/// let red = Card::new(2, 1, Category::Ribbon).with_ribbon(RibbonColor::Red);
///
/// assert_eq!(red.id, CardId::new(2));
/// assert_eq!(red.ribbon, Some(RibbonColor::Red));
/// assert_eq!(red.junk_value(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Month (1-12). Four cards share each month.
    pub month: u8,

    /// Card category, which decides the collected bucket.
    pub category: Category,

    /// Counts as two junk cards.
    pub double_junk: bool,

    /// One of the three bird cards (Godori).
    pub seasonal_animal: bool,

    /// The unique animal that also counts as bonus junk (Gukjin).
    pub special_animal: bool,

    /// Ribbon colour, for Ribbon cards that belong to a colour set.
    pub ribbon: Option<RibbonColor>,
}

impl Card {
    /// Create a plain card with no flags.
    #[must_use]
    pub const fn new(id: u8, month: u8, category: Category) -> Self {
        Self {
            id: CardId(id),
            month,
            category,
            double_junk: false,
            seasonal_animal: false,
            special_animal: false,
            ribbon: None,
        }
    }

    /// Mark as double junk.
    #[must_use]
    pub const fn with_double_junk(self) -> Self {
        Self {
            double_junk: true,
            ..self
        }
    }

    /// Mark as a bird (seasonal animal).
    #[must_use]
    pub const fn seasonal(self) -> Self {
        Self {
            seasonal_animal: true,
            ..self
        }
    }

    /// Mark as the special animal.
    #[must_use]
    pub const fn special(self) -> Self {
        Self {
            special_animal: true,
            ..self
        }
    }

    /// Set the ribbon colour.
    #[must_use]
    pub const fn with_ribbon(self, color: RibbonColor) -> Self {
        Self {
            ribbon: Some(color),
            ..self
        }
    }

    /// Is this the rain-month Bright?
    #[must_use]
    pub fn is_rain_bright(&self) -> bool {
        self.category == Category::Bright && self.month == RAIN_MONTH
    }

    /// Contribution to the junk count when held in the Junk bucket.
    ///
    /// Non-junk cards contribute nothing here; the special animal's bonus
    /// is applied by the bucket, not by the card.
    #[must_use]
    pub fn junk_value(&self) -> u32 {
        match (self.category, self.double_junk) {
            (Category::Junk, true) => 2,
            (Category::Junk, false) => 1,
            _ => 0,
        }
    }

    /// Do two cards share a month?
    #[must_use]
    pub fn same_month(&self, other: &Card) -> bool {
        self.month == other.month
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?}, month {})", self.id, self.category, self.month)
    }
}
