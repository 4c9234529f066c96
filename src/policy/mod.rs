//! Pluggable move and go/stop policies, plus the turn driver.
//!
//! The round engine never decides anything on a seat's behalf. A `Policy`
//! picks the card to play and answers the go/stop question; the driver
//! feeds those answers through the two-phase turn protocol.
//!
//! ## Key Types
//!
//! - `Policy`: the decision interface
//! - `HeuristicPolicy`: card-value heuristic used by tournament opponents
//! - `RandomPolicy`: uniform legal moves, always stops
//! - `driver`: `step`, `drive` and `play_out` over a `Round`

pub mod driver;
pub mod heuristic;
pub mod random;

use crate::cards::CardId;
use crate::core::{GameRng, GoStop, Player, PlayerId};
use crate::rules::Round;

pub use driver::{drive, play_out, step, DriverEvent};
pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;

/// Decision-making for one seat.
///
/// Implementations are trusted: the engine validates the card a policy
/// picks, but a `GoStop` answer is taken as given.
pub trait Policy: Send + Sync {
    /// Pick a card for `seat` to play.
    ///
    /// Returns `None` only when `seat` has no legal play.
    fn choose_move(&self, round: &Round, seat: PlayerId, rng: &mut GameRng) -> Option<CardId>;

    /// Go or stop. Only called once `me` has reached the winning score.
    fn choose_go_or_stop(&self, me: &Player, other: &Player, deck_size: usize) -> GoStop;
}
