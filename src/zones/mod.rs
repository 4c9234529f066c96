//! Zones a card can occupy outside the shared table.
//!
//! Hands are plain vectors on `Player`; the draw pile and floor live on
//! `RoundState`. This module holds the one structured zone: the collected
//! buckets each player captures into.

pub mod collected;

pub use collected::{CollectedCards, SPECIAL_ANIMAL_JUNK_BONUS};
