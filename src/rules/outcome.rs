//! Round outcome and the stop multipliers.
//!
//! On stop, the winner's running score is multiplied by four independent
//! factors, all judged on the collected cards at the moment of stopping:
//!
//! - go: `go_count + 1` once the winner has called go at least once
//! - go-bak: 2 when the loser had a go called against them
//! - gwang-bak: 2 when the winner scores brights and the loser holds none
//! - junk-bak: 2 when the loser's effective junk is 4 or less

use serde::{Deserialize, Serialize};

use super::scoring::bright_points;
use crate::cards::Category;
use crate::core::{Player, PlayerId};

/// Loser effective junk at or below which junk-bak applies.
pub const JUNK_BAK_THRESHOLD: u32 = 4;

/// Everything needed to recompute a stop's capital change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Winner's score before multipliers.
    pub base_score: u32,
    pub go_count: u32,
    pub go_bak: bool,
    pub gwang_bak: bool,
    pub junk_bak: bool,
}

impl Breakdown {
    /// Judge the multipliers for `winner` stopping against `loser`.
    #[must_use]
    pub fn assess(winner: &Player, loser: &Player) -> Self {
        let winner_bright_points = bright_points(winner.collected.bucket(Category::Bright));
        Self {
            base_score: winner.score,
            go_count: winner.go_count,
            go_bak: loser.is_go_bak,
            gwang_bak: winner_bright_points > 0
                && loser.collected.bucket(Category::Bright).is_empty(),
            junk_bak: loser.collected.effective_junk_count() <= JUNK_BAK_THRESHOLD,
        }
    }

    #[must_use]
    pub fn go_multiplier(&self) -> u32 {
        if self.go_count > 0 {
            self.go_count + 1
        } else {
            1
        }
    }

    /// Product of all four multipliers.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        let doubled = |flag: bool| if flag { 2 } else { 1 };
        self.go_multiplier()
            * doubled(self.go_bak)
            * doubled(self.gwang_bak)
            * doubled(self.junk_bak)
    }

    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.base_score * self.multiplier()
    }

    /// Capital moved from loser to winner at the given rate.
    #[must_use]
    pub fn capital_change(&self, rate: i64) -> i64 {
        i64::from(self.final_score()) * rate
    }
}

/// How a round ended.
///
/// `winner` and `loser` are both set or both `None` (a draw).
/// `capital_change` is a magnitude; the direction comes from the seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: Option<PlayerId>,
    pub loser: Option<PlayerId>,
    pub capital_change: i64,
    pub breakdown: Option<Breakdown>,
}

impl RoundOutcome {
    /// A drawn round: no winner, no transfer.
    #[must_use]
    pub fn draw() -> Self {
        Self {
            winner: None,
            loser: None,
            capital_change: 0,
            breakdown: None,
        }
    }

    /// Outcome of `winner` stopping against `loser`.
    #[must_use]
    pub fn stop(winner: &Player, loser: &Player, rate: i64) -> Self {
        let breakdown = Breakdown::assess(winner, loser);
        Self {
            winner: Some(winner.id),
            loser: Some(loser.id),
            capital_change: breakdown.capital_change(rate),
            breakdown: Some(breakdown),
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    /// Signed capital delta for a seat.
    #[must_use]
    pub fn delta_for(&self, seat: PlayerId) -> i64 {
        if self.winner == Some(seat) {
            self.capital_change
        } else if self.loser == Some(seat) {
            -self.capital_change
        } else {
            0
        }
    }
}
