//! Game rules: dealing, capture, scoring, round outcome and the round engine.
//!
//! Everything below `engine` is a pure function of its inputs; `engine`
//! owns the round state and is the only place it changes.

pub mod capture;
pub mod dealing;
pub mod engine;
pub mod outcome;
pub mod scoring;

pub use capture::{resolve_play, steal_junk, CaptureEvent, PlayResolution};
pub use dealing::{deal, deal_round, is_nagari, shuffled_deck, Deal};
pub use engine::{PendingPlay, PlayStep, Round, RoundPhase, TurnReport};
pub use outcome::{Breakdown, RoundOutcome};
pub use scoring::{score, ScoreCard, ScoredSet, SetKind};
