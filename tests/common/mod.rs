//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use matgo_engine::cards::{card, Card, CardId};
use matgo_engine::core::{
    GameRng, GoStop, Player, PlayerId, PlayerMap, RoundState, TournamentConfig,
};
use matgo_engine::policy::Policy;
use matgo_engine::rules::{Round, RoundOutcome, RoundPhase};
use matgo_engine::tournament::{Bracket, Participant, Tournament, TournamentPhase};

/// Catalog card by raw id.
pub fn c(id: u8) -> Card {
    *card(CardId::new(id)).expect("catalog id")
}

pub fn cards(ids: &[u8]) -> Vec<Card> {
    ids.iter().map(|&id| c(id)).collect()
}

/// Sorted raw ids, for order-insensitive comparisons.
pub fn ids<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<u8> {
    let mut ids: Vec<u8> = cards.into_iter().map(|c| c.id.raw()).collect();
    ids.sort_unstable();
    ids
}

/// Every raw id present in a round, sorted.
pub fn round_ids(round: &Round) -> Vec<u8> {
    ids(round.state().all_cards())
}

/// Install a test subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn players(capital: i64) -> PlayerMap<Player> {
    PlayerMap::new(|id| Player::new(id, format!("seat {id}"), capital))
}

/// A dealt round at the default rate.
pub fn dealt(seed: u64) -> Round {
    Round::new(&mut GameRng::new(seed), players(50_000), 100).expect("deal")
}

/// A hand-built table. Zones need not cover the whole deck.
pub struct Table {
    pub human_hand: Vec<u8>,
    pub opponent_hand: Vec<u8>,
    pub human_collected: Vec<u8>,
    pub opponent_collected: Vec<u8>,
    pub floor: Vec<u8>,
    pub deck: Vec<u8>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            human_hand: Vec::new(),
            opponent_hand: Vec::new(),
            human_collected: Vec::new(),
            opponent_collected: Vec::new(),
            floor: Vec::new(),
            deck: Vec::new(),
        }
    }

    pub fn round(&self) -> Round {
        let mut seats = players(50_000);
        seats[PlayerId::HUMAN].hand = cards(&self.human_hand);
        seats[PlayerId::OPPONENT].hand = cards(&self.opponent_hand);
        seats[PlayerId::HUMAN].collected.extend(cards(&self.human_collected));
        seats[PlayerId::OPPONENT].collected.extend(cards(&self.opponent_collected));

        let mut state = RoundState::new(seats);
        state.floor = cards(&self.floor).into_iter().collect();
        state.deck = cards(&self.deck).into_iter().collect();
        Round::from_parts(state, RoundPhase::Playing, None, None, 100)
    }
}

/// Plays the first legal card and always answers `decision`.
#[derive(Clone, Copy, Debug)]
pub struct FirstLegal {
    pub decision: GoStop,
}

impl Policy for FirstLegal {
    fn choose_move(&self, round: &Round, seat: PlayerId, _rng: &mut GameRng) -> Option<CardId> {
        round.legal_plays(seat).first().copied()
    }

    fn choose_go_or_stop(&self, _me: &Player, _other: &Player, _deck_size: usize) -> GoStop {
        self.decision
    }
}

/// Entrants in roster order with the human seeded first.
pub fn ordered_entrants() -> Vec<Participant> {
    std::iter::once(Participant::Human)
        .chain((1..=15).map(Participant::Opponent))
        .collect()
}

/// A bracket where the human has already won `wins` matches.
pub fn bracket_after(wins: usize) -> Bracket {
    let mut bracket = Bracket::seeded(&ordered_entrants());
    for round in 0..wins {
        bracket.advance_human(round).expect("advance");
    }
    bracket
}

/// A decisive outcome without a breakdown.
pub fn win_for(winner: PlayerId, capital_change: i64) -> RoundOutcome {
    RoundOutcome {
        winner: Some(winner),
        loser: Some(winner.other()),
        capital_change,
        breakdown: None,
    }
}

/// A restored tournament sitting at `RoundOver` in bracket round
/// `round_index`, with the given capitals and outcome still to settle.
pub fn settled_at(
    round_index: usize,
    human: i64,
    opponent: i64,
    outcome: RoundOutcome,
) -> Tournament {
    let config = TournamentConfig::default();
    let mut live = Tournament::new(99);
    live.start(config.clone()).expect("start");
    live.start_match().expect("start match");
    let mut snapshot = live.snapshot();

    let bracket = bracket_after(round_index);
    let Ok(Participant::Opponent(id)) = bracket.human_opponent(round_index) else {
        panic!("human has no opponent in round {round_index}");
    };

    let round = snapshot.round.take().expect("round in progress");
    let mut state = round.state().clone();
    state.player_mut(PlayerId::HUMAN).capital = human;
    state.player_mut(PlayerId::OPPONENT).capital = opponent;

    snapshot.round = Some(Round::from_parts(
        state,
        RoundPhase::RoundOver,
        None,
        Some(outcome),
        config.points_to_capital_rate,
    ));
    snapshot.phase = TournamentPhase::RoundOver;
    snapshot.bracket = Some(bracket);
    snapshot.round_index = round_index;
    snapshot.opponent = Some(id);
    snapshot.human_capital = human;
    Tournament::restore(snapshot).expect("valid crafted snapshot")
}

/// Run a tournament until it ends, with a policy on each seat.
///
/// Returns the number of rounds played.
pub fn run_to_end(tournament: &mut Tournament, seats: &PlayerMap<Option<&dyn Policy>>) -> usize {
    let mut rounds = 0;
    for _ in 0..100_000 {
        match tournament.phase() {
            TournamentPhase::MatchIntro => tournament.start_match().expect("start match"),
            TournamentPhase::Playing | TournamentPhase::GoOrStop => {
                tournament.drive(seats).expect("drive");
            }
            TournamentPhase::RoundOver => {
                rounds += 1;
                tournament.finish_round().expect("finish round");
            }
            TournamentPhase::GameOver | TournamentPhase::TournamentComplete => return rounds,
            TournamentPhase::TournamentIntro => panic!("tournament was never started"),
        }
    }
    panic!("tournament did not finish");
}
