//! Card system: definitions and the static catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Stable identifier (1..=48)
//! - `Card`: Immutable card data (month, category, scoring flags)
//! - `CATALOG`: The full 48-card deck in id order

pub mod catalog;
pub mod definition;

pub use catalog::{card, is_genuine, month_cards, CARDS_PER_MONTH, CATALOG, DECK_SIZE};
pub use definition::{Card, CardId, Category, RibbonColor, RAIN_MONTH};
