//! The fixed opponent roster.

use serde::{Deserialize, Serialize};

/// Display name of the human entrant.
pub const HUMAN_NAME: &str = "Player";
/// Display title of the human entrant.
pub const HUMAN_TITLE: &str = "Challenger";

/// A named tournament opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OpponentProfile {
    /// Roster id, 1..=15.
    pub id: u8,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl OpponentProfile {
    const fn new(
        id: u8,
        name: &'static str,
        title: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            title,
            description,
        }
    }
}

/// Every opponent, in roster order.
pub static OPPONENTS: [OpponentProfile; 15] = [
    OpponentProfile::new(
        1,
        "Kim Cheol-su",
        "The Gentle Neighbour",
        "New to the cards, but famous for his luck. Don't get careless.",
    ),
    OpponentProfile::new(
        2,
        "The Cat Keeper",
        "Woman of Mystery",
        "Always arrives with her cat, and her poker face is just as unreadable.",
    ),
    OpponentProfile::new(
        3,
        "The Returning Student",
        "Perfect in Theory",
        "Knows every theory by heart. Show him how it goes in practice.",
    ),
    OpponentProfile::new(
        4,
        "The Market Trader",
        "Master of Sums",
        "Counts everything in coins. Go after his capital.",
    ),
    OpponentProfile::new(
        5,
        "Mrs. Park",
        "The Neighbourhood Grapevine",
        "Nothing happens on her street without her knowing. Will her network matter at the table?",
    ),
    OpponentProfile::new(
        6,
        "The Romantic Poet",
        "Lover of Elegance",
        "Finds poetry in every card. Don't get swept up in his mood.",
    ),
    OpponentProfile::new(
        7,
        "The Young Programmer",
        "Ruler of Probability",
        "Plays like a machine that has counted every case. Find the gap.",
    ),
    OpponentProfile::new(
        8,
        "The Retired Detective",
        "Master of Mind Games",
        "Misses no flicker of expression. Can you slip past him?",
    ),
    OpponentProfile::new(
        9,
        "Mr. Lee",
        "Challenger from Abroad",
        "Made his name at poker in Las Vegas before turning to hwatu. Unpredictable.",
    ),
    OpponentProfile::new(
        10,
        "The Idol Trainee",
        "Born Competitor",
        "Would rather win than debut. Don't let the momentum run away.",
    ),
    OpponentProfile::new(
        11,
        "The Taciturn Chef",
        "Finest Ingredients, Finest Hands",
        "Builds combinations like recipes. Spoil the dish.",
    ),
    OpponentProfile::new(
        12,
        "The Masked Stranger",
        "Card Sharp of Unknown Origin",
        "Nobody knows who is behind the mask, or how good they are.",
    ),
    OpponentProfile::new(
        13,
        "Chairman Lee",
        "Titan of Industry",
        "Has never lost where money is concerned. Beat his fortune with skill.",
    ),
    OpponentProfile::new(
        14,
        "The Hidden Master",
        "Hermit of the Mountains",
        "Left the world behind to perfect the game. Reads the cards like the weather.",
    ),
    OpponentProfile::new(
        15,
        "The Shadow",
        "God of Hwatu",
        "Rumoured to rule every table. Beat the Shadow and become the new legend.",
    ),
];

/// Look up a profile by roster id.
#[must_use]
pub fn profile(id: u8) -> Option<&'static OpponentProfile> {
    OPPONENTS.iter().find(|p| p.id == id)
}
