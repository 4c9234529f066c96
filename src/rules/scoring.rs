//! Score calculation over a player's collected buckets.
//!
//! `score` is a pure function of bucket contents: it never looks at
//! insertion order, and every scored line carries its card ids sorted.
//!
//! ## Scoring Table
//!
//! | Line           | Condition                       | Points        |
//! |----------------|---------------------------------|---------------|
//! | Five brights   | 5 Bright                        | 15            |
//! | Four brights   | 4 Bright                        | 4             |
//! | Three brights  | 3 Bright, no rain Bright        | 3             |
//! | Three w/ rain  | 3 Bright including rain         | 2             |
//! | Birds          | all 3 seasonal animals          | 5             |
//! | Animals        | 5+ Animal                       | count - 4     |
//! | Red/Blue/Grass | all 3 ribbons of a colour       | 3 each        |
//! | Ribbons        | 5+ Ribbon                       | count - 4     |
//! | Junk           | effective junk 10+              | count - 9     |

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Category, RibbonColor};
use crate::zones::CollectedCards;

/// Bright cards needed before brights score.
const MIN_BRIGHTS: usize = 3;
/// Cards in a full bird set, and in each ribbon colour set.
const SET_SIZE: usize = 3;
/// Animal or ribbon count where the count bonus starts.
const COUNT_BONUS_FROM: usize = 5;
/// Effective junk where the junk bonus starts.
const JUNK_BONUS_FROM: u32 = 10;

/// A named scoring line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetKind {
    FiveBrights,
    FourBrights,
    ThreeBrights,
    ThreeBrightsWithRain,
    Birds,
    RedRibbons,
    BlueRibbons,
    GrassRibbons,
    /// Five or more animals.
    Animals,
    /// Five or more ribbons.
    Ribbons,
    /// Ten or more effective junk.
    Junk,
}

impl SetKind {
    /// Is this one of the bright tiers?
    #[must_use]
    pub fn is_bright(self) -> bool {
        matches!(
            self,
            SetKind::FiveBrights
                | SetKind::FourBrights
                | SetKind::ThreeBrights
                | SetKind::ThreeBrightsWithRain
        )
    }
}

impl std::fmt::Display for SetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SetKind::FiveBrights => "Five Brights",
            SetKind::FourBrights => "Four Brights",
            SetKind::ThreeBrights => "Three Brights",
            SetKind::ThreeBrightsWithRain => "Three Brights (with rain)",
            SetKind::Birds => "Birds",
            SetKind::RedRibbons => "Red Ribbons",
            SetKind::BlueRibbons => "Blue Ribbons",
            SetKind::GrassRibbons => "Grass Ribbons",
            SetKind::Animals => "Animals",
            SetKind::Ribbons => "Ribbons",
            SetKind::Junk => "Junk",
        };
        f.write_str(name)
    }
}

/// One scoring line with the cards that earned it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoredSet {
    pub kind: SetKind,
    pub points: u32,
    /// Contributing cards, sorted by id.
    pub card_ids: Vec<CardId>,
}

impl ScoredSet {
    fn new<'a>(kind: SetKind, points: u32, cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut card_ids: Vec<CardId> = cards.into_iter().map(|c| c.id).collect();
        card_ids.sort_unstable();
        Self {
            kind,
            points,
            card_ids,
        }
    }
}

/// Total score plus every line that contributed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total: u32,
    pub sets: Vec<ScoredSet>,
}

impl ScoreCard {
    fn push(&mut self, set: ScoredSet) {
        self.total += set.points;
        self.sets.push(set);
    }

    /// Points earned from the bright tier, if any.
    #[must_use]
    pub fn bright_points(&self) -> u32 {
        self.sets
            .iter()
            .filter(|s| s.kind.is_bright())
            .map(|s| s.points)
            .sum()
    }

    /// Find a line by kind.
    #[must_use]
    pub fn set(&self, kind: SetKind) -> Option<&ScoredSet> {
        self.sets.iter().find(|s| s.kind == kind)
    }
}

/// Score a player's collected buckets.
///
/// ```
/// use matgo_engine::cards::{card, CardId};
/// use matgo_engine::rules::scoring::{score, SetKind};
/// use matgo_engine::zones::CollectedCards;
///
/// let mut collected = CollectedCards::new();
/// for id in [1, 9, 45] {
///     collected.add(*card(CardId::new(id)).unwrap());
/// }
///
/// let card = score(&collected);
/// assert_eq!(card.total, 2);
/// assert_eq!(card.sets[0].kind, SetKind::ThreeBrightsWithRain);
/// ```
#[must_use]
pub fn score(collected: &CollectedCards) -> ScoreCard {
    let mut card = ScoreCard::default();

    // Brights
    let brights = collected.bucket(Category::Bright);
    if let Some((kind, points)) = bright_tier(brights) {
        card.push(ScoredSet::new(kind, points, brights));
    }

    // Animals
    let animals = collected.bucket(Category::Animal);
    let birds: Vec<&Card> = animals.iter().filter(|c| c.seasonal_animal).collect();
    if birds.len() == SET_SIZE {
        card.push(ScoredSet::new(SetKind::Birds, 5, birds));
    }
    if animals.len() >= COUNT_BONUS_FROM {
        card.push(ScoredSet::new(SetKind::Animals, count_bonus(animals.len()), animals));
    }

    // Ribbons
    let ribbons = collected.bucket(Category::Ribbon);
    for (color, kind) in [
        (RibbonColor::Red, SetKind::RedRibbons),
        (RibbonColor::Blue, SetKind::BlueRibbons),
        (RibbonColor::Grass, SetKind::GrassRibbons),
    ] {
        let colored: Vec<&Card> = ribbons.iter().filter(|c| c.ribbon == Some(color)).collect();
        if colored.len() == SET_SIZE {
            card.push(ScoredSet::new(kind, 3, colored));
        }
    }
    if ribbons.len() >= COUNT_BONUS_FROM {
        card.push(ScoredSet::new(SetKind::Ribbons, count_bonus(ribbons.len()), ribbons));
    }

    // Junk
    let junk = collected.effective_junk_count();
    if junk >= JUNK_BONUS_FROM {
        let contributing = collected
            .bucket(Category::Junk)
            .iter()
            .chain(animals.iter().filter(|c| c.special_animal));
        card.push(ScoredSet::new(SetKind::Junk, junk - (JUNK_BONUS_FROM - 1), contributing));
    }

    card
}

/// Points the bright bucket alone earns.
#[must_use]
pub fn bright_points(brights: &[Card]) -> u32 {
    bright_tier(brights).map_or(0, |(_, points)| points)
}

fn bright_tier(brights: &[Card]) -> Option<(SetKind, u32)> {
    match brights.len() {
        5 => Some((SetKind::FiveBrights, 15)),
        4 => Some((SetKind::FourBrights, 4)),
        MIN_BRIGHTS if brights.iter().any(Card::is_rain_bright) => {
            Some((SetKind::ThreeBrightsWithRain, 2))
        }
        MIN_BRIGHTS => Some((SetKind::ThreeBrights, 3)),
        _ => None,
    }
}

fn count_bonus(count: usize) -> u32 {
    (count - (COUNT_BONUS_FROM - 1)) as u32
}
