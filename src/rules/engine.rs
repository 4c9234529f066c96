//! The round engine: one deal from first play to round over.
//!
//! A turn runs in two explicit phases that the driver calls in order:
//!
//! 1. `play_phase`: validate the play, take the card from hand and draw
//!    the top of the pile. Both are held as a [`PendingPlay`].
//! 2. `resolve_phase`: resolve captures, run any junk steal, rescore and
//!    decide what comes next.
//!
//! `play` runs both back to back. Presentation layers that pace the reveal
//! call the phases separately; the engine never resolves a second play
//! while one is pending.
//!
//! ## Phases
//!
//! ```text
//! Playing --(own score >= 7)--> GoOrStop --Go--> Playing
//!    |                              |
//!    +--(pile empty)--> RoundOver <-+--Stop
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::capture::{resolve_play, CaptureEvent};
use super::dealing::deal_round;
use super::outcome::RoundOutcome;
use super::scoring::score;
use crate::cards::{Card, CardId};
use crate::core::config::{HAND_SIZE, WINNING_SCORE};
use crate::core::error::{GameError, Result};
use crate::core::{Action, GameRng, GoStop, Player, PlayerId, PlayerMap, RoundState};

/// Where a round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The current seat must play a card.
    Playing,
    /// The current seat reached the winning score and must go or stop.
    GoOrStop,
    /// Finished; see the outcome.
    RoundOver,
}

/// A card played and a card drawn, awaiting resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlay {
    pub player: PlayerId,
    pub played: Card,
    pub drawn: Card,
}

/// Result of the first turn phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayStep {
    /// The card left the hand and a card was drawn.
    Drawn(PendingPlay),
    /// The pile was empty: the round ended as a draw and the card stayed in hand.
    Exhausted,
}

/// What one resolved turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub played: Card,
    pub drawn: Card,
    pub event: CaptureEvent,
    pub captured: SmallVec<[Card; 8]>,
    /// Junk taken from the other seat, if a steal landed.
    pub stolen: Option<Card>,
    /// Acting seat's score after the turn.
    pub score: u32,
    /// Round phase after the turn.
    pub phase: RoundPhase,
}

/// One round between two seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    state: RoundState,
    phase: RoundPhase,
    pending: Option<PendingPlay>,
    outcome: Option<RoundOutcome>,
    rate: i64,
}

impl Round {
    /// Deal a new round, redealing void deals. Per-round player state is cleared.
    pub fn new(rng: &mut GameRng, mut players: PlayerMap<Player>, rate: i64) -> Result<Self> {
        let (deal, redeals) = deal_round(rng)?;
        let [human_hand, opponent_hand] = deal.hands;

        for (seat, hand) in [(PlayerId::HUMAN, human_hand), (PlayerId::OPPONENT, opponent_hand)] {
            let player = &mut players[seat];
            player.reset_for_round();
            player.id = seat;
            player.hand = hand;
        }

        let mut state = RoundState::new(players);
        state.floor = deal.floor.into_iter().collect();
        state.deck = deal.deck;

        tracing::debug!(redeals, "round dealt");
        Ok(Self::from_parts(state, RoundPhase::Playing, None, None, rate))
    }

    /// Assemble a round from saved parts. Run [`Round::validate`] before trusting it.
    #[must_use]
    pub fn from_parts(
        state: RoundState,
        phase: RoundPhase,
        pending: Option<PendingPlay>,
        outcome: Option<RoundOutcome>,
        rate: i64,
    ) -> Self {
        Self {
            state,
            phase,
            pending,
            outcome,
            rate,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingPlay> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn rate(&self) -> i64 {
        self.rate
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        self.state.player(id)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    /// Hand the seats back, for carrying capital into the next round.
    #[must_use]
    pub fn into_players(self) -> PlayerMap<Player> {
        self.state.players
    }

    // === Turn Protocol ===

    /// Cards `player` may play right now.
    ///
    /// When any hand card shares a month with the floor, only those cards
    /// are legal. Empty when it is not `player`'s turn to play.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<CardId> {
        if self.phase != RoundPhase::Playing
            || self.pending.is_some()
            || self.state.current_player != player
        {
            return Vec::new();
        }
        let hand = &self.state.player(player).hand;
        let matching: Vec<CardId> = hand
            .iter()
            .filter(|c| self.state.floor_matches(c).next().is_some())
            .map(|c| c.id)
            .collect();
        if matching.is_empty() {
            hand.iter().map(|c| c.id).collect()
        } else {
            matching
        }
    }

    /// First turn phase: play a card and draw.
    pub fn play_phase(&mut self, player: PlayerId, card: CardId) -> Result<PlayStep> {
        self.check_can_play(player, card)?;

        if self.state.deck.is_empty() {
            self.finish(RoundOutcome::draw());
            return Ok(PlayStep::Exhausted);
        }

        let (Some(played), Some(drawn)) = (
            self.state.player_mut(player).remove_from_hand(card),
            self.state.draw(),
        ) else {
            // Both were checked above
            return Err(GameError::CardNotInHand { player, card });
        };

        let pending = PendingPlay {
            player,
            played,
            drawn,
        };
        self.pending = Some(pending);
        Ok(PlayStep::Drawn(pending))
    }

    /// Second turn phase: resolve the pending play.
    pub fn resolve_phase(&mut self) -> Result<TurnReport> {
        let PendingPlay {
            player,
            played,
            drawn,
        } = self.pending.take().ok_or(GameError::NoPendingPlay)?;

        let resolution = resolve_play(played, self.state.floor.iter().copied(), drawn);
        self.state.floor = resolution.floor.clone();

        let (actor, victim) = self.state.players.pair_mut(player);
        let stolen = resolution.apply(actor, victim);
        refresh_score(actor);
        refresh_score(victim);
        let acting_score = actor.score;

        if acting_score >= WINNING_SCORE {
            self.phase = RoundPhase::GoOrStop;
        } else if self.out_of_cards() {
            self.finish(RoundOutcome::draw());
        } else {
            self.state.pass_turn();
        }

        tracing::debug!(
            %player,
            event = ?resolution.event,
            captured = resolution.captured.len(),
            stolen = stolen.is_some(),
            score = acting_score,
            "turn resolved"
        );

        Ok(TurnReport {
            player,
            played,
            drawn,
            event: resolution.event,
            captured: resolution.captured,
            stolen,
            score: acting_score,
            phase: self.phase,
        })
    }

    /// Both turn phases back to back.
    ///
    /// Returns `None` when the pile was already empty and the round ended
    /// as a draw without resolving anything.
    pub fn play(&mut self, player: PlayerId, card: CardId) -> Result<Option<TurnReport>> {
        match self.play_phase(player, card)? {
            PlayStep::Drawn(_) => self.resolve_phase().map(Some),
            PlayStep::Exhausted => Ok(None),
        }
    }

    /// Go or stop at the decision point.
    pub fn declare(&mut self, player: PlayerId, decision: GoStop) -> Result<()> {
        if self.phase != RoundPhase::GoOrStop {
            return Err(GameError::wrong_phase("declare", self.phase));
        }
        if self.state.current_player != player {
            return Err(GameError::OutOfTurn {
                expected: self.state.current_player,
                actual: player,
            });
        }

        match decision {
            GoStop::Go => {
                let (me, other) = self.state.players.pair_mut(player);
                me.go_count += 1;
                other.is_go_bak = true;
                tracing::debug!(%player, go_count = me.go_count, "go");

                if self.out_of_cards() {
                    self.finish(RoundOutcome::draw());
                } else {
                    self.phase = RoundPhase::Playing;
                    self.state.pass_turn();
                }
            }
            GoStop::Stop => {
                let outcome = RoundOutcome::stop(
                    self.state.player(player),
                    self.state.player(player.other()),
                    self.rate,
                );
                self.finish(outcome);
            }
        }
        Ok(())
    }

    /// Apply any action for `player`.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<Option<TurnReport>> {
        match action {
            Action::Play(card) => self.play(player, card),
            Action::Go => self.declare(player, GoStop::Go).map(|()| None),
            Action::Stop => self.declare(player, GoStop::Stop).map(|()| None),
        }
    }

    /// Check the zone invariant, seat bookkeeping and phase bookkeeping of
    /// a restored round.
    pub fn validate(&self) -> Result<()> {
        let in_flight: Vec<Card> = self
            .pending
            .iter()
            .flat_map(|p| [p.played, p.drawn])
            .collect();
        self.state.audit_zones(&in_flight)?;
        self.audit_seats()?;

        let consistent = match self.phase {
            RoundPhase::Playing => self.outcome.is_none(),
            RoundPhase::GoOrStop => self.outcome.is_none() && self.pending.is_none(),
            RoundPhase::RoundOver => self.outcome.is_some() && self.pending.is_none(),
        };
        let pending_seat_ok = self
            .pending
            .map_or(true, |p| p.player == self.state.current_player);
        if !consistent || !pending_seat_ok {
            return Err(GameError::wrong_phase("restore", self.phase));
        }
        Ok(())
    }

    // === Internals ===

    /// Seat ids in range and in their own slot, derived scores fresh, and
    /// outcome seats distinct.
    fn audit_seats(&self) -> Result<()> {
        let is_seat = |id: PlayerId| id == PlayerId::HUMAN || id == PlayerId::OPPONENT;

        if !is_seat(self.state.current_player) {
            return Err(GameError::snapshot(format!(
                "current seat {}",
                self.state.current_player
            )));
        }
        if let Some(pending) = &self.pending {
            if !is_seat(pending.player) {
                return Err(GameError::snapshot(format!("pending seat {}", pending.player)));
            }
        }
        for (seat, player) in self.state.players.iter() {
            if player.id != seat {
                return Err(GameError::snapshot(format!("{seat} holds {}", player.id)));
            }
            let card = score(&player.collected);
            if player.score != card.total || player.achieved_sets != card.sets {
                return Err(GameError::snapshot(format!(
                    "{seat} score {} does not match its captures ({})",
                    player.score, card.total
                )));
            }
            if player.go_count as usize > HAND_SIZE {
                return Err(GameError::snapshot(format!("{seat} go count {}", player.go_count)));
            }
            let other = self.state.player(seat.other());
            if player.is_go_bak != (other.go_count > 0) {
                return Err(GameError::snapshot(format!("{seat} go-bak flag out of step")));
            }
        }

        if let Some(outcome) = &self.outcome {
            let seats_ok = match (outcome.winner, outcome.loser) {
                (None, None) => outcome.capital_change == 0 && outcome.breakdown.is_none(),
                (Some(winner), Some(loser)) => {
                    is_seat(winner)
                        && loser == winner.other()
                        && outcome.capital_change >= 0
                        && outcome.breakdown.map_or(true, |b| {
                            let w = self.state.player(winner);
                            b.base_score == w.score
                                && b.go_count == w.go_count
                                && i64::from(b.final_score()).checked_mul(self.rate)
                                    == Some(outcome.capital_change)
                        })
                }
                _ => false,
            };
            if !seats_ok {
                return Err(GameError::snapshot(format!(
                    "outcome {:?} / {:?} does not fit the seats",
                    outcome.winner, outcome.loser
                )));
            }
        }
        Ok(())
    }

    fn check_can_play(&self, player: PlayerId, card: CardId) -> Result<()> {
        if self.phase != RoundPhase::Playing {
            return Err(GameError::wrong_phase("play", self.phase));
        }
        if self.pending.is_some() {
            return Err(GameError::wrong_phase("play", "pending resolution"));
        }
        if self.state.current_player != player {
            return Err(GameError::OutOfTurn {
                expected: self.state.current_player,
                actual: player,
            });
        }
        let seat = self.state.current();
        let Some(played) = seat.hand_card(card) else {
            return Err(GameError::CardNotInHand { player, card });
        };
        let has_match = |c: &Card| self.state.floor_matches(c).next().is_some();
        if !has_match(&played) && seat.hand.iter().any(has_match) {
            return Err(GameError::MustMatchFloor(card));
        }
        Ok(())
    }

    /// Nothing left to play: the pile or the next seat's hand is empty.
    fn out_of_cards(&self) -> bool {
        let next = self.state.current_player.other();
        self.state.deck.is_empty() || self.state.player(next).hand.is_empty()
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        match (outcome.winner, &outcome.breakdown) {
            (Some(winner), Some(breakdown)) => tracing::info!(
                %winner,
                final_score = breakdown.final_score(),
                capital_change = outcome.capital_change,
                "round over"
            ),
            _ => tracing::info!("round over: draw"),
        }
        self.pending = None;
        self.outcome = Some(outcome);
        self.phase = RoundPhase::RoundOver;
    }
}

/// Recompute a seat's score and achieved sets from its buckets.
fn refresh_score(player: &mut Player) {
    let card = score(&player.collected);
    player.score = card.total;
    player.achieved_sets = card.sets;
}
