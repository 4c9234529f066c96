//! Card-value heuristic used by tournament opponents.
//!
//! ## Move Choice
//!
//! With a floor match available, play the match worth the most: the two
//! cards' values, plus bonuses for completing its own bird or red-ribbon
//! set and for taking a card the other side needs for theirs. Without
//! one, discard the least valuable card, treating months the other side
//! is already collecting as more valuable.
//!
//! ## Go/Stop
//!
//! Aggressive against a go-bak'd opponent, cautious once the score is high,
//! after two goes, or when the pile runs low.

use crate::cards::{Card, CardId, Category, RibbonColor};
use crate::core::{GameRng, GoStop, Player, PlayerId};
use crate::rules::Round;

use super::Policy;

/// Score at which the heuristic always stops.
const COMFORTABLE_SCORE: u32 = 10;
/// Go below this score when nothing else decides.
const GREEDY_BELOW: u32 = 9;
const MAX_GOS: u32 = 2;
/// Stop when fewer cards than this remain in the pile.
const LOW_PILE: usize = 8;

const COMPLETE_OWN_BIRDS: f64 = 20.0;
const COMPLETE_OWN_RED: f64 = 15.0;
const BLOCK_RED: f64 = 10.0;
const BLOCK_BIRDS: f64 = 18.0;
const CONTESTED_MONTH: f64 = 5.0;

/// The tournament opponent heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPolicy;

/// Heuristic worth of a single card.
#[must_use]
pub fn card_value(card: &Card) -> f64 {
    match card.category {
        Category::Bright => 5.0,
        Category::Animal if card.seasonal_animal || card.special_animal => 4.0,
        Category::Animal => 3.0,
        Category::Ribbon => 2.0,
        Category::Junk if card.double_junk => 1.5,
        Category::Junk => 1.0,
    }
}

fn bird_count(player: &Player) -> usize {
    player
        .collected
        .bucket(Category::Animal)
        .iter()
        .filter(|c| c.seasonal_animal)
        .count()
}

fn red_ribbon_count(player: &Player) -> usize {
    player
        .collected
        .bucket(Category::Ribbon)
        .iter()
        .filter(|c| c.ribbon == Some(RibbonColor::Red))
        .count()
}

fn is_red_ribbon(card: &Card) -> bool {
    card.category == Category::Ribbon && card.ribbon == Some(RibbonColor::Red)
}

/// Worth of playing `hand` onto `target`.
fn match_value(hand: &Card, target: &Card, me: &Player, other: &Player) -> f64 {
    let mut value = card_value(hand) + card_value(target);

    let my_birds = bird_count(me);
    let my_red = red_ribbon_count(me);
    for card in [hand, target] {
        if card.seasonal_animal && my_birds == 2 {
            value += COMPLETE_OWN_BIRDS;
        }
        if is_red_ribbon(card) && my_red == 2 {
            value += COMPLETE_OWN_RED;
        }
    }

    if is_red_ribbon(target) && red_ribbon_count(other) == 2 {
        value += BLOCK_RED;
    }
    if target.seasonal_animal && bird_count(other) == 2 {
        value += BLOCK_BIRDS;
    }
    value
}

/// Cost of discarding `card` onto the floor.
fn discard_value(card: &Card, other: &Player) -> f64 {
    let contested = [Category::Junk, Category::Ribbon, Category::Animal]
        .into_iter()
        .flat_map(|cat| other.collected.bucket(cat).iter())
        .any(|c| c.same_month(card));
    if contested {
        card_value(card) + CONTESTED_MONTH
    } else {
        card_value(card)
    }
}

impl Policy for HeuristicPolicy {
    fn choose_move(&self, round: &Round, seat: PlayerId, _rng: &mut GameRng) -> Option<CardId> {
        let me = round.player(seat);
        let other = round.player(seat.other());
        let floor = &round.state().floor;

        let legal: Vec<Card> = round
            .legal_plays(seat)
            .into_iter()
            .filter_map(|id| me.hand_card(id))
            .collect();

        // First strictly-best candidate wins ties
        let mut best: Option<(Card, f64)> = None;
        for card in &legal {
            let Some(target) = floor.iter().find(|f| f.same_month(card)) else {
                continue;
            };
            let value = match_value(card, target, me, other);
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((*card, value));
            }
        }
        if let Some((card, _)) = best {
            return Some(card.id);
        }

        let mut worst: Option<(Card, f64)> = None;
        for card in &legal {
            let value = discard_value(card, other);
            if worst.map_or(true, |(_, v)| value < v) {
                worst = Some((*card, value));
            }
        }
        worst.map(|(card, _)| card.id)
    }

    fn choose_go_or_stop(&self, me: &Player, other: &Player, deck_size: usize) -> GoStop {
        if other.is_go_bak && me.score < COMFORTABLE_SCORE {
            return GoStop::Go;
        }
        if me.score >= COMFORTABLE_SCORE || me.go_count >= MAX_GOS || deck_size < LOW_PILE {
            return GoStop::Stop;
        }
        // Lock in a bright-bak
        if me.collected.bucket(Category::Bright).len() >= 3
            && other.collected.bucket(Category::Bright).is_empty()
        {
            return GoStop::Stop;
        }
        if me.score < GREEDY_BELOW {
            GoStop::Go
        } else {
            GoStop::Stop
        }
    }
}
