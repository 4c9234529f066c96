//! Tournament state machine integration tests.

mod common;

use common::{bracket_after, init_tracing, run_to_end, settled_at, win_for};
use matgo_engine::cards::CardId;
use matgo_engine::core::config::{opponent_capital, ROUND_COUNT};
use matgo_engine::core::{GameError, PlayerId, PlayerMap, TournamentConfig};
use matgo_engine::policy::{HeuristicPolicy, Policy, RandomPolicy};
use matgo_engine::rules::RoundOutcome;
use matgo_engine::tournament::{Participant, Progress, Tournament, TournamentPhase};

fn started(seed: u64, rate: i64) -> Tournament {
    let mut t = Tournament::new(seed);
    t.start(TournamentConfig::default().with_rate(rate)).unwrap();
    t
}

// =============================================================================
// Match Results
// =============================================================================

#[test]
fn test_final_win_completes_tournament() {
    init_tracing();
    let mut t = settled_at(3, 50_000, 500, win_for(PlayerId::HUMAN, 1_000));

    assert_eq!(t.finish_round(), Ok(Progress::Champion));
    assert_eq!(t.phase(), TournamentPhase::TournamentComplete);
    assert_eq!(t.human_capital(), 51_000);

    let bracket = t.bracket().unwrap();
    let final_match = bracket.round(ROUND_COUNT - 1).unwrap().matches[0];
    assert_eq!(final_match.winner, Some(Participant::Human));
    assert!(matches!(t.start_match(), Err(GameError::WrongPhase { .. })));

    // A new tournament may begin from here
    assert!(t.start(TournamentConfig::default()).is_ok());
    assert_eq!(t.phase(), TournamentPhase::MatchIntro);
}

#[test]
fn test_match_win_advances_bracket() {
    let mut t = settled_at(0, 50_000, 700, win_for(PlayerId::HUMAN, 700));

    assert_eq!(t.finish_round(), Ok(Progress::Advanced(1)));
    assert_eq!(t.phase(), TournamentPhase::MatchIntro);
    assert_eq!(t.round_index(), 1);
    assert!(t.round().is_none());

    let intro = t.next_opponent().unwrap();
    assert_eq!(intro.round_name, "Quarterfinal");
    assert_eq!(intro.capital, opponent_capital(1));
    assert_eq!(intro.profile.id, 2);

    // Human capital carries over; the opponent starts fresh
    t.start_match().unwrap();
    let round = t.round().unwrap();
    assert_eq!(round.player(PlayerId::HUMAN).capital, 50_700);
    assert_eq!(round.player(PlayerId::OPPONENT).capital, 75_000);
}

#[test]
fn test_human_bankrupt_is_game_over() {
    let mut t = settled_at(1, 500, 80_000, win_for(PlayerId::OPPONENT, 1_000));

    assert_eq!(t.finish_round(), Ok(Progress::GameOver));
    assert_eq!(t.phase(), TournamentPhase::GameOver);
    assert_eq!(t.human_capital(), -500);
    assert!(t.finish_round().is_err());
}

#[test]
fn test_game_over_wins_over_round_result() {
    // Human wins the round, but both end at or below zero
    let mut t = settled_at(2, -2_000, 300, win_for(PlayerId::HUMAN, 1_000));

    assert_eq!(t.finish_round(), Ok(Progress::GameOver));
    assert_eq!(t.phase(), TournamentPhase::GameOver);
    assert_eq!(t.round_index(), 2);
}

#[test]
fn test_exactly_zero_is_bankrupt() {
    let mut t = settled_at(0, 50_000, 1_000, win_for(PlayerId::HUMAN, 1_000));
    assert_eq!(t.finish_round(), Ok(Progress::Advanced(1)));

    let mut t = settled_at(0, 1_000, 50_000, win_for(PlayerId::OPPONENT, 1_000));
    assert_eq!(t.finish_round(), Ok(Progress::GameOver));
}

#[test]
fn test_draw_deals_rematch() {
    let mut t = settled_at(0, 42_000, 58_000, RoundOutcome::draw());

    assert_eq!(t.finish_round(), Ok(Progress::Rematch));
    assert_eq!(t.phase(), TournamentPhase::Playing);
    let round = t.round().unwrap();
    assert_eq!(round.player(PlayerId::HUMAN).capital, 42_000);
    assert_eq!(round.player(PlayerId::OPPONENT).capital, 58_000);
    assert_eq!(round.player(PlayerId::HUMAN).hand.len(), 10);
    assert!(round.player(PlayerId::HUMAN).collected.is_empty());
}

#[test]
fn test_undecided_match_continues() {
    let mut t = settled_at(1, 50_000, 75_000, win_for(PlayerId::HUMAN, 2_000));

    assert_eq!(t.finish_round(), Ok(Progress::Rematch));
    assert_eq!(t.human_capital(), 52_000);
    assert_eq!(t.round().unwrap().player(PlayerId::OPPONENT).capital, 73_000);
    assert_eq!(t.round_index(), 1);
}

// =============================================================================
// Playing Through the Tournament
// =============================================================================

#[test]
fn test_full_tournaments_terminate() {
    let random: &dyn Policy = &RandomPolicy;
    let heuristic: &dyn Policy = &HeuristicPolicy;
    let seats = PlayerMap::from_pair(Some(random), Some(heuristic));

    for seed in 0..10 {
        // Any decisive round bankrupts the loser at this rate
        let mut t = started(seed, 1_000_000);
        let rounds = run_to_end(&mut t, &seats);
        assert!(rounds >= 1);

        match t.phase() {
            TournamentPhase::GameOver => assert!(t.human_capital() <= 0),
            TournamentPhase::TournamentComplete => {
                assert_eq!(t.round_index(), ROUND_COUNT - 1);
                assert!(t.human_capital() > 0);
            }
            other => panic!("unexpected end phase {other:?}"),
        }
        assert!(t.bracket().unwrap().validate().is_ok());
    }
}

#[test]
fn test_manual_seat_waits_for_caller() {
    let heuristic: &dyn Policy = &HeuristicPolicy;
    let seats = PlayerMap::from_pair(None, Some(heuristic));
    let mut t = started(31, 100);
    t.start_match().unwrap();

    // Human acts first, so the driver does nothing
    assert!(t.drive(&seats).unwrap().is_empty());

    let card = t.legal_plays(PlayerId::HUMAN)[0];
    t.play(PlayerId::HUMAN, card).unwrap();
    t.drive(&seats).unwrap();

    let round = t.round().unwrap();
    assert!(round.is_over() || round.current_player() == PlayerId::HUMAN);
    assert_eq!(t.phase(), TournamentPhase::from(round.phase()));
}

#[test]
fn test_invalid_move_keeps_phase() {
    let mut t = started(5, 100);
    t.start_match().unwrap();
    let before = t.snapshot();

    let foreign = t.round().unwrap().player(PlayerId::OPPONENT).hand[0].id;
    assert!(t.play(PlayerId::HUMAN, foreign).is_err());
    assert!(t.play(PlayerId::HUMAN, CardId::new(0)).is_err());
    assert_eq!(t.snapshot(), before);
}

#[test]
fn test_bracket_stays_valid_while_advancing() {
    for wins in 0..ROUND_COUNT {
        let bracket = bracket_after(wins);
        assert!(bracket.validate().is_ok(), "after {wins} wins");
    }
}

#[test]
fn test_reset_abandons_match() {
    let mut t = started(8, 100);
    t.start_match().unwrap();
    t.reset();

    assert_eq!(t.phase(), TournamentPhase::TournamentIntro);
    assert!(t.round().is_none());
    assert!(matches!(t.start_match(), Err(GameError::WrongPhase { .. })));
}
