//! Uniform random policy.

use crate::cards::CardId;
use crate::core::{GameRng, GoStop, Player, PlayerId};
use crate::rules::Round;

use super::Policy;

/// Plays a uniformly random legal card and always stops.
///
/// Deterministic for a given RNG seed, which makes it the stub of choice
/// for engine tests and benchmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn choose_move(&self, round: &Round, seat: PlayerId, rng: &mut GameRng) -> Option<CardId> {
        let legal = round.legal_plays(seat);
        rng.choose(&legal).copied()
    }

    fn choose_go_or_stop(&self, _me: &Player, _other: &Player, _deck_size: usize) -> GoStop {
        GoStop::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerMap;

    fn fresh_round(seed: u64) -> Round {
        let players = PlayerMap::new(|id| Player::new(id, "p", 50_000));
        Round::new(&mut GameRng::new(seed), players, 100).unwrap()
    }

    #[test]
    fn test_picks_legal_card() {
        let round = fresh_round(3);
        let legal = round.legal_plays(PlayerId::HUMAN);

        let mut rng = GameRng::new(11);
        for _ in 0..20 {
            let card = RandomPolicy.choose_move(&round, PlayerId::HUMAN, &mut rng).unwrap();
            assert!(legal.contains(&card));
        }
    }

    #[test]
    fn test_no_move_off_turn() {
        let round = fresh_round(3);
        let mut rng = GameRng::new(11);
        assert_eq!(RandomPolicy.choose_move(&round, PlayerId::OPPONENT, &mut rng), None);
    }

    #[test]
    fn test_seeded_choices_repeat() {
        let round = fresh_round(5);
        let a = RandomPolicy.choose_move(&round, PlayerId::HUMAN, &mut GameRng::new(1));
        let b = RandomPolicy.choose_move(&round, PlayerId::HUMAN, &mut GameRng::new(1));
        assert_eq!(a, b);
    }
}
