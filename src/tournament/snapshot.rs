//! Tournament snapshots for persistence.
//!
//! A snapshot is the whole tournament: phase, configuration, RNG position,
//! bracket, and the round in progress (players, pile, floor, turn, pending
//! play, outcome). Restoring one verbatim reproduces identical behavior
//! from that point on.
//!
//! Encoding is bincode. Decoding and validation both map to
//! [`GameError::Snapshot`] so a caller only needs one fallback path.

use serde::{Deserialize, Serialize};

use super::bracket::{Bracket, Participant};
use super::machine::TournamentPhase;
use crate::core::config::{TournamentConfig, ROUND_COUNT};
use crate::core::error::{GameError, Result};
use crate::core::{GameRngState, PlayerId};
use crate::rules::Round;

/// Bumped whenever the encoded layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable tournament state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub phase: TournamentPhase,
    pub config: TournamentConfig,
    pub rng: GameRngState,
    pub bracket: Option<Bracket>,
    pub round_index: usize,
    pub human_capital: i64,
    /// Roster id of the opponent being played.
    pub opponent: Option<u8>,
    pub round: Option<Round>,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::snapshot(e.to_string()))
    }

    /// Decode with bincode. Does not validate; see [`Snapshot::validate`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::snapshot(e.to_string()))
    }

    /// Check the snapshot describes a reachable tournament state.
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(GameError::snapshot(format!(
                "version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        self.config
            .validate()
            .map_err(|e| GameError::snapshot(e.to_string()))?;
        if self.round_index >= ROUND_COUNT {
            return Err(GameError::snapshot(format!("round index {}", self.round_index)));
        }

        let Some(bracket) = &self.bracket else {
            return match (self.phase, &self.round) {
                (TournamentPhase::TournamentIntro, None) => Ok(()),
                _ => Err(GameError::snapshot(format!("{:?} without a bracket", self.phase))),
            };
        };
        bracket
            .validate()
            .map_err(|e| GameError::snapshot(e.to_string()))?;

        match self.phase {
            TournamentPhase::TournamentIntro => {
                Err(GameError::snapshot("bracket present before the tournament started"))
            }
            TournamentPhase::MatchIntro => {
                if self.round.is_some() {
                    return Err(GameError::snapshot("round present before the match started"));
                }
                bracket
                    .human_opponent(self.round_index)
                    .map(|_| ())
                    .map_err(|e| GameError::snapshot(e.to_string()))
            }
            TournamentPhase::Playing | TournamentPhase::GoOrStop | TournamentPhase::RoundOver => {
                let round = self.round.as_ref().ok_or_else(|| {
                    GameError::snapshot(format!("{:?} without a round", self.phase))
                })?;
                if TournamentPhase::from(round.phase()) != self.phase {
                    return Err(GameError::snapshot(format!(
                        "tournament phase {:?} but round phase {:?}",
                        self.phase,
                        round.phase()
                    )));
                }
                self.check_round(round)?;
                let expected = bracket
                    .human_opponent(self.round_index)
                    .map_err(|e| GameError::snapshot(e.to_string()))?;
                match self.opponent {
                    Some(id) if Participant::Opponent(id) == expected => Ok(()),
                    _ => Err(GameError::snapshot(format!(
                        "opponent {:?} is not the bracket's {expected:?}",
                        self.opponent
                    ))),
                }
            }
            TournamentPhase::GameOver => {
                if self.human_capital > 0 {
                    return Err(GameError::snapshot("game over with capital left"));
                }
                self.round.as_ref().map_or(Ok(()), |r| self.check_round(r))
            }
            TournamentPhase::TournamentComplete => {
                let human_champion = bracket
                    .round(ROUND_COUNT - 1)
                    .and_then(|r| r.matches.first())
                    .and_then(|m| m.winner)
                    .map_or(false, Participant::is_human);
                if !human_champion || self.round_index != ROUND_COUNT - 1 {
                    return Err(GameError::snapshot("tournament complete without a human champion"));
                }
                self.round.as_ref().map_or(Ok(()), |r| self.check_round(r))
            }
        }
    }

    fn check_round(&self, round: &Round) -> Result<()> {
        if round.rate() != self.config.points_to_capital_rate {
            return Err(GameError::snapshot(format!(
                "round rate {} differs from configured {}",
                round.rate(),
                self.config.points_to_capital_rate
            )));
        }
        round.validate().map_err(|e| match e {
            GameError::Snapshot(_) => e,
            other => GameError::snapshot(other.to_string()),
        })?;
        if round.player(PlayerId::HUMAN).capital != self.human_capital {
            return Err(GameError::snapshot("human capital out of sync with the round"));
        }
        Ok(())
    }
}
