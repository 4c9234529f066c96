//! Game constants and tournament configuration.
//!
//! The rules are fixed: bracket size, round count, starting capital and the
//! winning score are named constants rather than settings. The only tunable
//! is the points-to-capital rate, fixed per tournament before it starts.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

pub use crate::cards::DECK_SIZE;

/// Score a player must reach before go/stop becomes available.
pub const WINNING_SCORE: u32 = 7;

/// Entrants in the round-of-16 bracket.
pub const BRACKET_SIZE: usize = 16;

/// Bracket rounds: Round of 16, Quarterfinal, Semifinal, Final.
pub const ROUND_COUNT: usize = 4;

/// Display names of the bracket rounds, by round index.
pub const ROUND_NAMES: [&str; ROUND_COUNT] = ["Round of 16", "Quarterfinal", "Semifinal", "Final"];

/// Starting capital for the human and for the first-round opponent.
pub const BASE_STARTING_CAPITAL: i64 = 50_000;

/// Extra opponent capital per bracket round.
pub const CAPITAL_INCREMENT_PER_ROUND: i64 = 25_000;

pub const DEFAULT_POINTS_TO_CAPITAL_RATE: i64 = 100;
pub const MIN_POINTS_TO_CAPITAL_RATE: i64 = 10;
pub const MAX_POINTS_TO_CAPITAL_RATE: i64 = 1_000_000;

/// Cards dealt to each hand.
pub const HAND_SIZE: usize = 10;

/// Cards dealt face up to the floor.
pub const FLOOR_SIZE: usize = 8;

/// Starting capital of the opponent faced in a bracket round.
///
/// ```
/// use matgo_engine::core::config::opponent_capital;
///
/// assert_eq!(opponent_capital(0), 50_000);
/// assert_eq!(opponent_capital(3), 125_000);
/// ```
#[must_use]
pub const fn opponent_capital(round_index: usize) -> i64 {
    BASE_STARTING_CAPITAL + round_index as i64 * CAPITAL_INCREMENT_PER_ROUND
}

/// Display name of a bracket round.
#[must_use]
pub fn round_name(round_index: usize) -> Option<&'static str> {
    ROUND_NAMES.get(round_index).copied()
}

/// Per-tournament configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Capital transferred per final point.
    pub points_to_capital_rate: i64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            points_to_capital_rate: DEFAULT_POINTS_TO_CAPITAL_RATE,
        }
    }
}

impl TournamentConfig {
    /// Set the points-to-capital rate.
    #[must_use]
    pub fn with_rate(mut self, rate: i64) -> Self {
        self.points_to_capital_rate = rate;
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        let range = MIN_POINTS_TO_CAPITAL_RATE..=MAX_POINTS_TO_CAPITAL_RATE;
        if !range.contains(&self.points_to_capital_rate) {
            return Err(GameError::InvalidConfig(format!(
                "points-to-capital rate {} outside {}..={}",
                self.points_to_capital_rate, MIN_POINTS_TO_CAPITAL_RATE, MAX_POINTS_TO_CAPITAL_RATE
            )));
        }
        Ok(())
    }
}
