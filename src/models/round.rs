//! A tournament round.

use serde::{Deserialize, Serialize};

use super::{Match, MatchId, PlayerId};

/// One round: its matches plus the players who sat out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-based)
    pub number: u32,

    pub matches: Vec<Match>,

    /// Players with no pairing this round, in standings order. No bye points.
    pub unpaired: Vec<PlayerId>,
}

impl Round {
    pub fn new(number: u32, matches: Vec<Match>, unpaired: Vec<PlayerId>) -> Self {
        Self {
            number,
            matches,
            unpaired,
        }
    }

    /// Every match has been resolved. An empty round is complete.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.resolved)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_pending())
    }

    pub fn get_match(&self, id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.id == id)
    }

    pub(crate) fn get_match_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| &m.id == id)
    }

    /// Pairings as (first, second) player IDs.
    pub fn pairings(&self) -> Vec<(PlayerId, PlayerId)> {
        self.matches
            .iter()
            .map(|m| (m.first.clone(), m.second.clone()))
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.matches.iter().filter(|m| m.resolved).count()
    }
}
