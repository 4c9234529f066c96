//! # matgo-engine
//!
//! A two-player Go-Stop (Matgo) round engine and the 16-entrant
//! single-elimination tournament built on top of it.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: A `Round` or `Tournament` owns all of its state.
//!    Nothing is global; persistence is a `Snapshot` taken at any point.
//!
//! 2. **Validate, Then Mutate**: Every operation that changes state checks
//!    first and returns `Err` with the state untouched.
//!
//! 3. **Deterministic**: All randomness flows through one seeded
//!    `GameRng` whose position is part of the snapshot.
//!
//! ## Architecture
//!
//! - **Two-Phase Turns**: `play_phase` takes the card and draws;
//!   `resolve_phase` captures, steals and rescores. Presentation layers
//!   pace the reveal between them.
//!
//! - **Pluggable Policies**: Opponent decisions come through the `Policy`
//!   trait, so engine tests run against seeded stubs.
//!
//! - **Persistent Data Structures**: The pile and floor are `im::Vector`,
//!   so cloning a round for look-ahead or snapshots is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, actions, round state, errors
//! - `cards`: Card definitions and the 48-card catalog
//! - `zones`: Collected-card buckets
//! - `rules`: Dealing, capture, scoring, outcome and the round engine
//! - `policy`: Move/go-stop policies and the turn driver
//! - `tournament`: Bracket, opponent roster, state machine, snapshots

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod policy;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    Action, GameError, GameRng, GameRngState, GoStop, Player, PlayerId, PlayerMap, Result,
    RoundState, TournamentConfig, WINNING_SCORE,
};

pub use crate::cards::{Card, CardId, Category, RibbonColor, CATALOG, DECK_SIZE};

pub use crate::zones::CollectedCards;

pub use crate::rules::{
    CaptureEvent, PendingPlay, PlayStep, Round, RoundOutcome, RoundPhase, ScoreCard, ScoredSet,
    SetKind, TurnReport,
};

pub use crate::policy::{DriverEvent, HeuristicPolicy, Policy, RandomPolicy};

pub use crate::tournament::{
    Bracket, Participant, Progress, Snapshot, Tournament, TournamentPhase, OPPONENTS,
};
