//! Single-elimination bracket.
//!
//! Four rounds of 8, 4, 2 and 1 matches. The round of 16 is fully seeded
//! at creation; later rounds start as empty placeholders and fill in as
//! the human advances.
//!
//! Only the human's matches are actually played. When the human wins, the
//! adjacent match (the one that feeds the same next-round match) is
//! settled by a fixed placeholder: its first slot advances. That result is
//! not competitive and says nothing about the two opponents involved.

use serde::{Deserialize, Serialize};

use super::opponents::OPPONENTS;
use crate::core::config::{round_name, BRACKET_SIZE, ROUND_COUNT};
use crate::core::error::{GameError, Result};
use crate::core::GameRng;

/// A bracket entrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// The single human entrant.
    Human,
    /// A roster opponent, by profile id.
    Opponent(u8),
}

impl Participant {
    #[must_use]
    pub fn is_human(self) -> bool {
        self == Participant::Human
    }
}

/// One bracket match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub p1: Option<Participant>,
    pub p2: Option<Participant>,
    pub winner: Option<Participant>,
}

impl Match {
    #[must_use]
    pub fn new(p1: Participant, p2: Participant) -> Self {
        Self {
            p1: Some(p1),
            p2: Some(p2),
            winner: None,
        }
    }

    /// Does either slot hold `who`?
    #[must_use]
    pub fn involves(&self, who: Participant) -> bool {
        self.p1 == Some(who) || self.p2 == Some(who)
    }

    /// The slot facing `who`, if `who` is in this match.
    #[must_use]
    pub fn opponent_of(&self, who: Participant) -> Option<Participant> {
        if self.p1 == Some(who) {
            self.p2
        } else if self.p2 == Some(who) {
            self.p1
        } else {
            None
        }
    }
}

/// One named round of the bracket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRound {
    pub name: String,
    pub matches: Vec<Match>,
}

/// What happened when the human won a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The human moves on to this round index.
    NextRound(usize),
    /// The human won the Final.
    Champion,
}

/// The whole bracket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    rounds: Vec<BracketRound>,
}

impl Bracket {
    /// Seed the human and the 15 roster opponents in random order.
    #[must_use]
    pub fn new(rng: &mut GameRng) -> Self {
        let mut entrants: Vec<Participant> = std::iter::once(Participant::Human)
            .chain(OPPONENTS.iter().map(|p| Participant::Opponent(p.id)))
            .collect();
        rng.shuffle(&mut entrants);
        Self::seeded(&entrants)
    }

    /// Build a bracket from 16 entrants in pairing order.
    ///
    /// Extra entrants are ignored and missing ones leave empty slots, so
    /// callers should check the result with [`Bracket::validate`].
    #[must_use]
    pub fn seeded(entrants: &[Participant]) -> Self {
        let first = BracketRound {
            name: round_name(0).unwrap_or_default().to_string(),
            matches: (0..BRACKET_SIZE / 2)
                .map(|i| Match {
                    p1: entrants.get(2 * i).copied(),
                    p2: entrants.get(2 * i + 1).copied(),
                    winner: None,
                })
                .collect(),
        };
        let rounds = std::iter::once(first)
            .chain((1..ROUND_COUNT).map(|r| BracketRound {
                name: round_name(r).unwrap_or_default().to_string(),
                matches: vec![Match::default(); expected_matches(r)],
            }))
            .collect();
        Self { rounds }
    }

    #[must_use]
    pub fn rounds(&self) -> &[BracketRound] {
        &self.rounds
    }

    #[must_use]
    pub fn round(&self, index: usize) -> Option<&BracketRound> {
        self.rounds.get(index)
    }

    /// The human's match in a round, with its index.
    #[must_use]
    pub fn human_match(&self, round_index: usize) -> Option<(usize, &Match)> {
        self.rounds
            .get(round_index)?
            .matches
            .iter()
            .enumerate()
            .find(|(_, m)| m.involves(Participant::Human))
    }

    /// The human's opponent in a round.
    pub fn human_opponent(&self, round_index: usize) -> Result<Participant> {
        let (_, m) = self
            .human_match(round_index)
            .ok_or_else(|| GameError::bracket(format!("no human match in round {round_index}")))?;
        m.opponent_of(Participant::Human).ok_or_else(|| {
            GameError::bracket(format!("no opponent for the human in round {round_index}"))
        })
    }

    /// Record a human match win and fill the next round's match.
    ///
    /// The adjacent match resolves by the first-slot placeholder, filling
    /// its own feeder matches the same way when they were never played.
    /// Checks everything before changing anything.
    pub fn advance_human(&mut self, round_index: usize) -> Result<Advance> {
        let (match_index, _) = self
            .human_match(round_index)
            .ok_or_else(|| GameError::bracket(format!("no human match in round {round_index}")))?;
        let next_index = round_index + 1;
        let parent = match_index / 2;
        if next_index < ROUND_COUNT
            && self.rounds.get(next_index).map_or(true, |r| r.matches.len() <= parent)
        {
            return Err(GameError::bracket(format!("round {next_index} has no match {parent}")));
        }

        self.rounds[round_index].matches[match_index].winner = Some(Participant::Human);
        if next_index >= ROUND_COUNT {
            return Ok(Advance::Champion);
        }

        self.settle(round_index, match_index ^ 1);

        let matches = &self.rounds[round_index].matches;
        let p1 = matches.get(parent * 2).and_then(|m| m.winner);
        let p2 = matches.get(parent * 2 + 1).and_then(|m| m.winner);
        self.rounds[next_index].matches[parent] = Match {
            p1,
            p2,
            winner: None,
        };

        tracing::info!(round = next_index, ?p1, ?p2, "bracket advanced");
        Ok(Advance::NextRound(next_index))
    }

    /// Winner of a match nobody plays: the first slot, after filling empty
    /// slots from the feeder matches.
    fn settle(&mut self, round_index: usize, match_index: usize) -> Option<Participant> {
        let mut m = *self.rounds.get(round_index)?.matches.get(match_index)?;
        if m.winner.is_some() {
            return m.winner;
        }
        if round_index > 0 && m.p1.is_none() && m.p2.is_none() {
            m.p1 = self.settle(round_index - 1, match_index * 2);
            m.p2 = self.settle(round_index - 1, match_index * 2 + 1);
        }
        m.winner = m.p1;
        self.rounds[round_index].matches[match_index] = m;
        m.winner
    }

    /// Check the bracket's shape and seeding.
    pub fn validate(&self) -> Result<()> {
        if self.rounds.len() != ROUND_COUNT {
            return Err(GameError::bracket(format!("{} rounds", self.rounds.len())));
        }
        for (index, round) in self.rounds.iter().enumerate() {
            if round.matches.len() != expected_matches(index) {
                return Err(GameError::bracket(format!(
                    "round {index} has {} matches",
                    round.matches.len()
                )));
            }
        }

        let mut seeded: Vec<Participant> = self.rounds[0]
            .matches
            .iter()
            .flat_map(|m| [m.p1, m.p2])
            .flatten()
            .collect();
        seeded.sort_by_key(|p| match p {
            Participant::Human => 0,
            Participant::Opponent(id) => u16::from(*id),
        });
        let expected: Vec<Participant> = std::iter::once(Participant::Human)
            .chain(OPPONENTS.iter().map(|p| Participant::Opponent(p.id)))
            .collect();
        if seeded != expected {
            return Err(GameError::bracket("round of 16 is not the full field"));
        }

        for (index, round) in self.rounds.iter().enumerate() {
            let humans = round.matches.iter().filter(|m| m.involves(Participant::Human)).count();
            if humans > 1 {
                return Err(GameError::bracket(format!("human appears twice in round {index}")));
            }
            for m in &round.matches {
                if m.winner.is_some_and(|w| !m.involves(w)) {
                    return Err(GameError::bracket(format!(
                        "round {index} winner not in its match"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Matches in a round: 8, 4, 2, 1.
#[must_use]
pub const fn expected_matches(round_index: usize) -> usize {
    BRACKET_SIZE >> (round_index + 1)
}
