//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! These are the building blocks the rules and tournament layers share.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{Player, PlayerId, PlayerMap, SEATS};
pub use rng::{GameRng, GameRngState};
pub use config::{TournamentConfig, WINNING_SCORE};
pub use action::{Action, GoStop};
pub use state::RoundState;
pub use error::{GameError, Result};
