//! The 16-entrant single-elimination tournament.
//!
//! ## Key Types
//!
//! - `Tournament`: owns the RNG, bracket and active round; drives the
//!   intro, match, round and terminal phases
//! - `Bracket`: four rounds of matches, with the placeholder rule for
//!   matches the human is not in
//! - `OPPONENTS`: the fixed roster of 15 opponents
//! - `Snapshot`: the whole tournament, for persistence

pub mod bracket;
pub mod machine;
pub mod opponents;
pub mod snapshot;

pub use bracket::{Advance, Bracket, BracketRound, Match, Participant};
pub use machine::{OpponentIntro, Progress, Tournament, TournamentPhase};
pub use opponents::{profile, OpponentProfile, HUMAN_NAME, HUMAN_TITLE, OPPONENTS};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
