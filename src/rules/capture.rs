//! Capture resolution for a single turn.
//!
//! Given the played card, the floor and the drawn card, decide what the
//! acting player captures and what is left on the floor. Resolution is a
//! pure function; the junk steal it may trigger is applied separately by
//! [`PlayResolution::apply`].
//!
//! ## Resolution Order
//!
//! 1. Ppeok: one floor match, and the drawn card shares the month. Nothing
//!    is captured; both cards land on the floor.
//! 2. Jjok: no floor match, and the drawn card shares the month. Both are
//!    captured and one junk is stolen.
//! 3. Hand phase: the played card takes every floor card of its month.
//!    Exactly two matches is a double chok and steals one junk.
//! 4. Flip phase: the drawn card takes every card of its month on the floor
//!    as left by step 3, or joins the floor.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::Player;
use crate::zones::CollectedCards;

/// Named outcome of a single play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureEvent {
    /// Nothing captured.
    Plain,
    /// An ordinary match capture.
    Chok,
    /// Played card and drawn card pair up on an empty month.
    Jjok,
    /// Clash: the played card, its match and the drawn card all stay on the floor.
    Ppeok,
    /// The played card took two floor cards at once.
    DoubleChok,
}

impl CaptureEvent {
    /// Does this event steal one junk from the other player?
    #[must_use]
    pub fn triggers_steal(self) -> bool {
        matches!(self, CaptureEvent::Jjok | CaptureEvent::DoubleChok)
    }
}

/// Outcome of resolving one play against the floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayResolution {
    /// Floor after both phases.
    pub floor: Vector<Card>,

    /// Cards captured by the acting player, played card first.
    pub captured: SmallVec<[Card; 8]>,

    pub event: CaptureEvent,
}

impl PlayResolution {
    /// Move the captures into `actor`'s buckets and run any junk steal.
    ///
    /// Returns the stolen card, if one changed hands.
    pub fn apply(&self, actor: &mut Player, victim: &mut Player) -> Option<Card> {
        actor.collected.extend(self.captured.iter().copied());
        if self.event.triggers_steal() {
            steal_junk(&mut victim.collected, &mut actor.collected)
        } else {
            None
        }
    }
}

/// Resolve a played card and a drawn card against the floor.
///
/// ## Example
///
/// ```
/// use matgo_engine::cards::{card, CardId};
/// use matgo_engine::rules::capture::{resolve_play, CaptureEvent};
///
/// let c = |id| *card(CardId::new(id)).unwrap();
///
/// // January junk on the floor, play the January bright, draw a February junk
/// let resolution = resolve_play(c(1), [c(3), c(9)], c(7));
///
/// assert_eq!(resolution.event, CaptureEvent::Chok);
/// assert_eq!(resolution.captured.len(), 2);
/// assert_eq!(resolution.floor.len(), 2); // March bright and the drawn card
/// ```
pub fn resolve_play<I>(played: Card, floor: I, drawn: Card) -> PlayResolution
where
    I: IntoIterator<Item = Card>,
{
    let mut floor: Vector<Card> = floor.into_iter().collect();
    let mut captured: SmallVec<[Card; 8]> = SmallVec::new();

    let hand_matches = floor.iter().filter(|c| c.same_month(&played)).count();
    let drawn_pairs_played = drawn.same_month(&played);

    if hand_matches == 1 && drawn_pairs_played {
        floor.push_back(played);
        floor.push_back(drawn);
        return PlayResolution {
            floor,
            captured,
            event: CaptureEvent::Ppeok,
        };
    }

    if hand_matches == 0 && drawn_pairs_played {
        captured.push(played);
        captured.push(drawn);
        return PlayResolution {
            floor,
            captured,
            event: CaptureEvent::Jjok,
        };
    }

    // Hand phase
    let mut event = CaptureEvent::Plain;
    if hand_matches > 0 {
        event = if hand_matches == 2 {
            CaptureEvent::DoubleChok
        } else {
            CaptureEvent::Chok
        };
        captured.push(played);
        captured.extend(take_month(&mut floor, played.month));
    } else {
        floor.push_back(played);
    }

    // Flip phase
    let flip_matches = take_month(&mut floor, drawn.month);
    if flip_matches.is_empty() {
        floor.push_back(drawn);
    } else {
        if event == CaptureEvent::Plain {
            event = CaptureEvent::Chok;
        }
        captured.push(drawn);
        captured.extend(flip_matches);
    }

    PlayResolution {
        floor,
        captured,
        event,
    }
}

/// Remove and return every floor card of `month`.
fn take_month(floor: &mut Vector<Card>, month: u8) -> SmallVec<[Card; 4]> {
    let taken: SmallVec<[Card; 4]> = floor.iter().filter(|c| c.month == month).copied().collect();
    if !taken.is_empty() {
        floor.retain(|c| c.month != month);
    }
    taken
}

/// Move one junk card from `victim` to `thief`.
///
/// Prefers a single junk card. No-op when the victim holds no junk.
pub fn steal_junk(victim: &mut CollectedCards, thief: &mut CollectedCards) -> Option<Card> {
    let stolen = victim.take_junk_for_steal()?;
    thief.add(stolen);
    Some(stolen)
}
