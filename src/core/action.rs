//! Actions a seat can take during a round.
//!
//! A turn is either a card play (resolved in two phases by the round
//! engine) or, at the decision point after reaching the winning score,
//! a go or stop declaration.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Decision at the go/stop point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoStop {
    /// Keep playing for a bigger multiplier.
    Go,
    /// End the round and collect.
    Stop,
}

/// A complete action.
///
/// ## Example
///
/// ```
/// use matgo_engine::cards::CardId;
/// use matgo_engine::core::{Action, GoStop};
///
/// let play = Action::Play(CardId::new(5));
/// assert_eq!(play.card(), Some(CardId::new(5)));
///
/// let stop = Action::from(GoStop::Stop);
/// assert!(stop.is_declaration());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand.
    Play(CardId),
    Go,
    Stop,
}

impl Action {
    /// The played card, for play actions.
    #[must_use]
    pub fn card(self) -> Option<CardId> {
        match self {
            Action::Play(card) => Some(card),
            Action::Go | Action::Stop => None,
        }
    }

    /// Is this a go/stop declaration?
    #[must_use]
    pub fn is_declaration(self) -> bool {
        matches!(self, Action::Go | Action::Stop)
    }

    /// The declaration, for go/stop actions.
    #[must_use]
    pub fn declaration(self) -> Option<GoStop> {
        match self {
            Action::Go => Some(GoStop::Go),
            Action::Stop => Some(GoStop::Stop),
            Action::Play(_) => None,
        }
    }
}

impl From<GoStop> for Action {
    fn from(decision: GoStop) -> Self {
        match decision {
            GoStop::Go => Action::Go,
            GoStop::Stop => Action::Stop,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play(card) => write!(f, "Play({card})"),
            Action::Go => write!(f, "Go"),
            Action::Stop => write!(f, "Stop"),
        }
    }
}
