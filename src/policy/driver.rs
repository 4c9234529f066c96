//! Turn driver: runs seats' policies through the round engine.
//!
//! Seats without a policy are driven by the caller. `drive` stops as soon
//! as such a seat has to act, which is how a human seat with auto-play
//! switched off is handled; giving that seat a policy is auto-play.

use crate::core::error::{GameError, Result};
use crate::core::{GameRng, GoStop, PlayerId, PlayerMap};
use crate::rules::{Round, RoundOutcome, RoundPhase, TurnReport};

use super::Policy;

/// One action the driver took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverEvent {
    /// A card was played and resolved.
    Played(TurnReport),
    /// A go or stop was declared.
    Declared { player: PlayerId, decision: GoStop },
    /// The pile was empty when `player` tried to play; the round is a draw.
    Exhausted { player: PlayerId },
}

/// Take one action for the seat to act using `policy`.
///
/// Returns `None` when the round is already over.
pub fn step(
    round: &mut Round,
    policy: &dyn Policy,
    rng: &mut GameRng,
) -> Result<Option<DriverEvent>> {
    let seat = round.current_player();
    match round.phase() {
        RoundPhase::RoundOver => Ok(None),
        RoundPhase::Playing => {
            let card = policy
                .choose_move(round, seat, rng)
                .ok_or(GameError::NoLegalPlay(seat))?;
            let event = match round.play(seat, card)? {
                Some(report) => DriverEvent::Played(report),
                None => DriverEvent::Exhausted { player: seat },
            };
            Ok(Some(event))
        }
        RoundPhase::GoOrStop => {
            let decision = policy.choose_go_or_stop(
                round.player(seat),
                round.player(seat.other()),
                round.state().deck_len(),
            );
            round.declare(seat, decision)?;
            Ok(Some(DriverEvent::Declared {
                player: seat,
                decision,
            }))
        }
    }
}

/// Act for every seat that has a policy until a seat without one must act
/// or the round is over.
pub fn drive(
    round: &mut Round,
    seats: &PlayerMap<Option<&dyn Policy>>,
    rng: &mut GameRng,
) -> Result<Vec<DriverEvent>> {
    let mut events = Vec::new();
    while !round.is_over() {
        let seat = round.current_player();
        let Some(policy) = seats[seat] else {
            break;
        };
        match step(round, policy, rng)? {
            Some(event) => events.push(event),
            None => break,
        }
    }
    Ok(events)
}

/// Play the round to its end with a policy on each seat.
pub fn play_out(
    round: &mut Round,
    seats: &PlayerMap<&dyn Policy>,
    rng: &mut GameRng,
) -> Result<RoundOutcome> {
    loop {
        let policy = seats[round.current_player()];
        if step(round, policy, rng)?.is_none() {
            break;
        }
    }
    round
        .outcome()
        .cloned()
        .ok_or_else(|| GameError::wrong_phase("play_out", round.phase()))
}
