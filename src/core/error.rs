//! Engine error type.
//!
//! Every state-changing operation validates before it mutates, so an `Err`
//! always means "rejected, state untouched". Deck exhaustion and void deals
//! are normal game flow and never surface as errors.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;

/// Central engine error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The card is not in the acting player's hand.
    #[error("{card} is not in the hand of {player}")]
    CardNotInHand { player: PlayerId, card: CardId },

    /// A player tried to act on the other player's turn.
    #[error("out of turn: {actual} acted while it is {expected}'s turn")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },

    /// A floor month can be matched from hand, but the played card does not match.
    #[error("{0} does not match the floor while a matching card is held")]
    MustMatchFloor(CardId),

    /// The operation is not valid in the current phase.
    #[error("{operation} is not allowed during {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: String,
    },

    /// `resolve_phase` was called without a preceding `play_phase`.
    #[error("no play is pending resolution")]
    NoPendingPlay,

    /// A policy was asked to move but returned nothing.
    #[error("{0} has no card to play")]
    NoLegalPlay(PlayerId),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A deck handed to the dealer is not a full catalog deck.
    #[error("invalid deck: {0}")]
    InvalidDeck(String),

    /// A persisted snapshot could not be decoded or failed validation.
    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    /// The bracket no longer describes a playable tournament.
    #[error("bracket inconsistency: {0}")]
    BracketInconsistency(String),
}

impl GameError {
    pub fn wrong_phase(operation: &'static str, phase: impl std::fmt::Debug) -> Self {
        Self::WrongPhase {
            operation,
            phase: format!("{phase:?}"),
        }
    }

    pub fn snapshot(detail: impl Into<String>) -> Self {
        Self::Snapshot(detail.into())
    }

    pub fn bracket(detail: impl Into<String>) -> Self {
        Self::BracketInconsistency(detail.into())
    }

    /// Is this a rejected move (as opposed to a broken state or input)?
    #[must_use]
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Self::CardNotInHand { .. }
                | Self::OutOfTurn { .. }
                | Self::MustMatchFloor(_)
                | Self::WrongPhase { .. }
                | Self::NoPendingPlay
        )
    }
}

/// Engine result type.
pub type Result<T> = std::result::Result<T, GameError>;
