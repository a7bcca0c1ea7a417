//! Match model: one game between two paired players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, Outcome, PlayerId, TournamentId};

/// A single game between two players in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier (derived from tournament, round and both players)
    pub id: MatchId,

    /// Round number (1-based)
    pub round: u32,

    /// First player (white)
    pub first: PlayerId,

    /// Second player (black)
    pub second: PlayerId,

    /// Outcome, once known. Never changes after it is set.
    pub outcome: Option<Outcome>,

    /// Whether the resolver has applied this match to the registry
    pub resolved: bool,

    /// When the result was applied
    pub played_at: Option<DateTime<Utc>>,
}

impl Match {
    /// Create an unresolved match with a deterministic ID.
    pub fn new(tournament_id: &TournamentId, round: u32, first: PlayerId, second: PlayerId) -> Self {
        let id = EntityId::generate(&[
            tournament_id.as_str(),
            &round.to_string(),
            first.as_str(),
            second.as_str(),
        ]);

        Self {
            id,
            round,
            first,
            second,
            outcome: None,
            resolved: false,
            played_at: None,
        }
    }

    /// Builder method for matches whose outcome is known up front.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.first == player || &self.second == player
    }

    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        if &self.first == player {
            Some(&self.second)
        } else if &self.second == player {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.resolved
    }
}
