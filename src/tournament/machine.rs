//! The tournament state machine.
//!
//! ```text
//! TournamentIntro --start--> MatchIntro --start_match--> Playing <-> GoOrStop
//!                                ^                          |          |
//!                                |                          v          v
//!                                +------ finish_round <-- RoundOver <--+
//!                                              |
//!                               GameOver / TournamentComplete / Playing (rematch)
//! ```
//!
//! `Tournament` owns everything: the RNG, the bracket, and the round being
//! played. Round operations are delegated to [`Round`] and the tournament
//! phase follows the round phase after each call.
//!
//! A bracket that cannot produce the human's next opponent is treated as
//! corrupt. The tournament logs it, restarts with the same configuration
//! and returns the error.

use serde::{Deserialize, Serialize};

use super::bracket::{Advance, Bracket, Participant};
use super::opponents::{profile, OpponentProfile, HUMAN_NAME};
use super::snapshot::{Snapshot, SNAPSHOT_VERSION};
use crate::cards::CardId;
use crate::core::config::{opponent_capital, round_name, TournamentConfig, BASE_STARTING_CAPITAL};
use crate::core::error::{GameError, Result};
use crate::core::{Action, GameRng, GoStop, Player, PlayerId, PlayerMap};
use crate::policy::{self, DriverEvent, Policy};
use crate::rules::{PlayStep, Round, RoundOutcome, RoundPhase, TurnReport};

/// Where the tournament stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentPhase {
    /// Not started.
    TournamentIntro,
    /// The next opponent is known; the match has not begun.
    MatchIntro,
    Playing,
    GoOrStop,
    /// A round finished; `finish_round` settles it.
    RoundOver,
    /// The human went bankrupt. Terminal until the next `start`.
    GameOver,
    /// The human won the Final. Terminal until the next `start`.
    TournamentComplete,
}

impl TournamentPhase {
    /// Is a round active in this phase?
    #[must_use]
    pub fn is_in_round(self) -> bool {
        matches!(self, Self::Playing | Self::GoOrStop | Self::RoundOver)
    }

    /// Can a new tournament start from here?
    #[must_use]
    pub fn can_start(self) -> bool {
        matches!(self, Self::TournamentIntro | Self::GameOver | Self::TournamentComplete)
    }
}

impl From<RoundPhase> for TournamentPhase {
    fn from(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Playing => Self::Playing,
            RoundPhase::GoOrStop => Self::GoOrStop,
            RoundPhase::RoundOver => Self::RoundOver,
        }
    }
}

/// Who the human faces next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpponentIntro {
    pub profile: &'static OpponentProfile,
    /// The opponent's starting capital for this match.
    pub capital: i64,
    pub round_name: &'static str,
}

/// What `finish_round` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Neither side is bankrupt; a new round was dealt.
    Rematch,
    /// The human won the match and moves on to this bracket round.
    Advanced(usize),
    /// The human won the Final.
    Champion,
    /// The human is bankrupt.
    GameOver,
}

/// A whole tournament.
#[derive(Clone, Debug)]
pub struct Tournament {
    phase: TournamentPhase,
    config: TournamentConfig,
    rng: GameRng,
    bracket: Option<Bracket>,
    round_index: usize,
    human_capital: i64,
    opponent: Option<u8>,
    round: Option<Round>,
}

impl Tournament {
    /// A tournament at the intro screen.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            phase: TournamentPhase::TournamentIntro,
            config: TournamentConfig::default(),
            rng,
            bracket: None,
            round_index: 0,
            human_capital: BASE_STARTING_CAPITAL,
            opponent: None,
            round: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> TournamentPhase {
        self.phase
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    #[must_use]
    pub fn round_name(&self) -> Option<&'static str> {
        round_name(self.round_index)
    }

    /// The human's capital between rounds. Stays in step with the
    /// human seat of the active round.
    #[must_use]
    pub fn human_capital(&self) -> i64 {
        self.human_capital
    }

    /// Profile of the opponent currently being played.
    #[must_use]
    pub fn opponent(&self) -> Option<&'static OpponentProfile> {
        self.opponent.and_then(profile)
    }

    /// The active round, or the last one after the tournament ended.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.round.as_ref().and_then(Round::outcome)
    }

    // === Lifecycle ===

    /// Start a tournament: seed a fresh bracket and meet the first opponent.
    pub fn start(&mut self, config: TournamentConfig) -> Result<()> {
        if !self.phase.can_start() {
            return Err(GameError::wrong_phase("start", self.phase));
        }
        config.validate()?;
        self.begin(config);
        Ok(())
    }

    fn begin(&mut self, config: TournamentConfig) {
        tracing::info!(
            rate = config.points_to_capital_rate,
            seed = self.rng.seed(),
            "tournament started"
        );
        self.bracket = Some(Bracket::new(&mut self.rng));
        self.config = config;
        self.round_index = 0;
        self.human_capital = BASE_STARTING_CAPITAL;
        self.opponent = None;
        self.round = None;
        self.phase = TournamentPhase::MatchIntro;
    }

    /// Abandon everything and go back to the intro. The RNG stream carries on.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(rng);
    }

    /// The human's opponent in the current bracket round.
    pub fn next_opponent(&self) -> Result<OpponentIntro> {
        let bracket = self
            .bracket
            .as_ref()
            .ok_or_else(|| GameError::wrong_phase("next_opponent", self.phase))?;
        let profile = opponent_profile(bracket.human_opponent(self.round_index)?)?;
        Ok(OpponentIntro {
            profile,
            capital: opponent_capital(self.round_index),
            round_name: round_name(self.round_index).unwrap_or_default(),
        })
    }

    /// Begin the match against the next opponent and deal its first round.
    pub fn start_match(&mut self) -> Result<()> {
        if self.phase != TournamentPhase::MatchIntro {
            return Err(GameError::wrong_phase("start_match", self.phase));
        }
        let intro = match self.next_opponent() {
            Ok(intro) => intro,
            Err(err) => return Err(self.restart_after(err)),
        };

        let players = PlayerMap::from_pair(
            Player::new(PlayerId::HUMAN, HUMAN_NAME, self.human_capital),
            Player::new(PlayerId::OPPONENT, intro.profile.name, intro.capital),
        );
        let round = Round::new(&mut self.rng, players, self.config.points_to_capital_rate)?;

        tracing::info!(
            round = intro.round_name,
            opponent = intro.profile.name,
            opponent_capital = intro.capital,
            "match started"
        );
        self.opponent = Some(intro.profile.id);
        self.round = Some(round);
        self.phase = TournamentPhase::Playing;
        Ok(())
    }

    /// Settle a finished round: move capital, then rematch, advance, or end.
    pub fn finish_round(&mut self) -> Result<Progress> {
        if self.phase != TournamentPhase::RoundOver {
            return Err(GameError::wrong_phase("finish_round", self.phase));
        }
        let round = self
            .round
            .as_ref()
            .ok_or_else(|| GameError::wrong_phase("finish_round", self.phase))?;
        let outcome = round
            .outcome()
            .cloned()
            .ok_or_else(|| GameError::wrong_phase("finish_round", round.phase()))?;

        let mut state = round.state().clone();
        for seat in PlayerId::all() {
            let player = state.player_mut(seat);
            player.capital = player.capital.saturating_add(outcome.delta_for(seat));
        }
        let human = state.player(PlayerId::HUMAN).capital;
        let opponent = state.player(PlayerId::OPPONENT).capital;
        let settled =
            Round::from_parts(state, RoundPhase::RoundOver, None, Some(outcome), round.rate());

        if human <= 0 {
            tracing::info!(human, opponent, "human bankrupt, game over");
            self.human_capital = human;
            self.round = Some(settled);
            self.phase = TournamentPhase::GameOver;
            return Ok(Progress::GameOver);
        }

        if opponent <= 0 {
            let advance = match self.bracket.as_mut() {
                Some(bracket) => bracket.advance_human(self.round_index),
                None => Err(GameError::bracket("no bracket")),
            };
            let advance = match advance {
                Ok(advance) => advance,
                Err(err) => return Err(self.restart_after(err)),
            };
            self.human_capital = human;
            tracing::info!(round = self.round_index, human, "match won");
            return Ok(match advance {
                Advance::Champion => {
                    tracing::info!(human, "tournament complete");
                    self.round = Some(settled);
                    self.phase = TournamentPhase::TournamentComplete;
                    Progress::Champion
                }
                Advance::NextRound(next) => {
                    self.round_index = next;
                    self.opponent = None;
                    self.round = None;
                    self.phase = TournamentPhase::MatchIntro;
                    Progress::Advanced(next)
                }
            });
        }

        let next = Round::new(
            &mut self.rng,
            settled.into_players(),
            self.config.points_to_capital_rate,
        )?;
        tracing::debug!(human, opponent, "rematch");
        self.human_capital = human;
        self.round = Some(next);
        self.phase = TournamentPhase::Playing;
        Ok(Progress::Rematch)
    }

    fn restart_after(&mut self, err: GameError) -> GameError {
        tracing::error!(
            %err,
            round = self.round_index,
            "bracket inconsistent, restarting tournament"
        );
        let config = self.config.clone();
        self.reset();
        self.begin(config);
        err
    }

    // === Round operations ===

    /// Cards `player` may legally play right now.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<CardId> {
        match &self.round {
            Some(round) if self.phase.is_in_round() => round.legal_plays(player),
            _ => Vec::new(),
        }
    }

    pub fn play_phase(&mut self, player: PlayerId, card: CardId) -> Result<PlayStep> {
        self.in_round("play_phase", |round| round.play_phase(player, card))
    }

    pub fn resolve_phase(&mut self) -> Result<TurnReport> {
        self.in_round("resolve_phase", Round::resolve_phase)
    }

    pub fn play(&mut self, player: PlayerId, card: CardId) -> Result<Option<TurnReport>> {
        self.in_round("play", |round| round.play(player, card))
    }

    pub fn declare(&mut self, player: PlayerId, decision: GoStop) -> Result<()> {
        self.in_round("declare", |round| round.declare(player, decision))
    }

    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<Option<TurnReport>> {
        self.in_round("apply", |round| round.apply(player, action))
    }

    /// Let policies act for the seats that have one, using the tournament RNG.
    pub fn drive(&mut self, seats: &PlayerMap<Option<&dyn Policy>>) -> Result<Vec<DriverEvent>> {
        if !self.phase.is_in_round() {
            return Err(GameError::wrong_phase("drive", self.phase));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(GameError::wrong_phase("drive", self.phase));
        };
        let result = policy::drive(round, seats, &mut self.rng);
        self.phase = round.phase().into();
        result
    }

    fn in_round<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Round) -> Result<T>,
    ) -> Result<T> {
        if !self.phase.is_in_round() {
            return Err(GameError::wrong_phase(operation, self.phase));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(GameError::wrong_phase(operation, self.phase));
        };
        let result = f(round);
        if let Err(err) = &result {
            if err.is_invalid_move() {
                tracing::warn!(%err, operation, "move rejected");
            }
        }
        self.phase = round.phase().into();
        result
    }

    // === Persistence ===

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            phase: self.phase,
            config: self.config.clone(),
            rng: self.rng.state(),
            bracket: self.bracket.clone(),
            round_index: self.round_index,
            human_capital: self.human_capital,
            opponent: self.opponent,
            round: self.round.clone(),
        }
    }

    /// Rebuild a tournament from a validated snapshot.
    pub fn restore(snapshot: Snapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self {
            phase: snapshot.phase,
            config: snapshot.config,
            rng: GameRng::from_state(&snapshot.rng),
            bracket: snapshot.bracket,
            round_index: snapshot.round_index,
            human_capital: snapshot.human_capital,
            opponent: snapshot.opponent,
            round: snapshot.round,
        })
    }

    /// Restore from encoded bytes, or start fresh if they are unusable.
    #[must_use]
    pub fn restore_or_new(bytes: &[u8], seed: u64) -> Self {
        match Snapshot::from_bytes(bytes).and_then(Self::restore) {
            Ok(tournament) => tournament,
            Err(err) => {
                tracing::warn!(%err, "discarding saved tournament");
                Self::new(seed)
            }
        }
    }
}

fn opponent_profile(participant: Participant) -> Result<&'static OpponentProfile> {
    match participant {
        Participant::Opponent(id) => {
            profile(id).ok_or_else(|| GameError::bracket(format!("unknown opponent {id}")))
        }
        Participant::Human => Err(GameError::bracket("the human is paired with itself")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CAPITAL_INCREMENT_PER_ROUND;
    use crate::policy::RandomPolicy;

    fn started(seed: u64) -> Tournament {
        let mut t = Tournament::new(seed);
        t.start(TournamentConfig::default()).unwrap();
        t
    }

    fn play_round(t: &mut Tournament) {
        let policy: &dyn Policy = &RandomPolicy;
        t.drive(&PlayerMap::with_value(Some(policy))).unwrap();
        assert_eq!(t.phase(), TournamentPhase::RoundOver);
    }

    #[test]
    fn test_starts_in_intro() {
        let t = Tournament::new(0);
        assert_eq!(t.phase(), TournamentPhase::TournamentIntro);
        assert!(t.bracket().is_none());
        assert!(t.next_opponent().is_err());
    }

    #[test]
    fn test_start_rejects_bad_rate() {
        let mut t = Tournament::new(0);
        let err = t.start(TournamentConfig::default().with_rate(0)).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert_eq!(t.phase(), TournamentPhase::TournamentIntro);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut t = started(0);
        assert!(t.start(TournamentConfig::default()).is_err());
        assert_eq!(t.phase(), TournamentPhase::MatchIntro);
    }

    #[test]
    fn test_match_intro() {
        let t = started(4);
        let intro = t.next_opponent().unwrap();
        assert_eq!(intro.capital, BASE_STARTING_CAPITAL);
        assert_eq!(intro.round_name, "Round of 16");
        assert_eq!(t.human_capital(), BASE_STARTING_CAPITAL);
    }

    #[test]
    fn test_start_match_deals() {
        let mut t = started(4);
        let intro = t.next_opponent().unwrap();
        t.start_match().unwrap();

        assert_eq!(t.phase(), TournamentPhase::Playing);
        assert_eq!(t.opponent(), Some(intro.profile));
        let round = t.round().unwrap();
        assert_eq!(round.player(PlayerId::OPPONENT).name, intro.profile.name);
        assert_eq!(round.player(PlayerId::HUMAN).name, HUMAN_NAME);
        assert_eq!(round.player(PlayerId::HUMAN).hand.len(), 10);
    }

    #[test]
    fn test_round_ops_need_a_round() {
        let mut t = started(4);
        let err = t.declare(PlayerId::HUMAN, GoStop::Stop).unwrap_err();
        assert!(matches!(err, GameError::WrongPhase { .. }));
        assert!(t.legal_plays(PlayerId::HUMAN).is_empty());
        assert!(t.finish_round().is_err());
    }

    #[test]
    fn test_phase_follows_round() {
        let mut t = started(9);
        t.start_match().unwrap();
        play_round(&mut t);
        assert!(t.outcome().is_some());
    }

    #[test]
    fn test_finish_round_moves_capital() {
        let mut t = started(9);
        t.start_match().unwrap();
        play_round(&mut t);
        let outcome = t.outcome().cloned().unwrap();

        let progress = t.finish_round().unwrap();
        assert_eq!(progress, Progress::Rematch);
        assert_eq!(t.phase(), TournamentPhase::Playing);
        assert_eq!(t.human_capital(), BASE_STARTING_CAPITAL + outcome.delta_for(PlayerId::HUMAN));
        let round = t.round().unwrap();
        assert_eq!(round.player(PlayerId::HUMAN).capital, t.human_capital());
        assert_eq!(
            round.player(PlayerId::OPPONENT).capital,
            BASE_STARTING_CAPITAL + outcome.delta_for(PlayerId::OPPONENT)
        );
    }

    #[test]
    fn test_reset_returns_to_intro() {
        let mut t = started(2);
        t.start_match().unwrap();
        t.reset();
        assert_eq!(t.phase(), TournamentPhase::TournamentIntro);
        assert!(t.round().is_none());
        assert!(t.bracket().is_none());
        assert!(t.start(TournamentConfig::default()).is_ok());
    }

    #[test]
    fn test_opponent_capital_scales() {
        assert_eq!(opponent_capital(2), BASE_STARTING_CAPITAL + 2 * CAPITAL_INCREMENT_PER_ROUND);
    }

    #[test]
    fn test_corrupt_bracket_restarts() {
        let mut t = started(6);
        t.bracket = Some(Bracket::seeded(&[]));

        let err = t.start_match().unwrap_err();
        assert!(matches!(err, GameError::BracketInconsistency(_)));
        assert_eq!(t.phase(), TournamentPhase::MatchIntro);
        assert!(t.bracket().unwrap().validate().is_ok());
        assert!(t.start_match().is_ok());
    }

    #[test]
    fn test_restore_or_new_falls_back() {
        let t = Tournament::restore_or_new(b"not a snapshot", 3);
        assert_eq!(t.phase(), TournamentPhase::TournamentIntro);
    }
}
