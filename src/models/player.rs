//! Tournament player model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{PlayerId, Score};

/// Win/loss/draw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl WinLossRecord {
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            wins,
            losses,
            draws,
        }
    }

    /// Total games played.
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

impl std::fmt::Display for WinLossRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// A player entered in a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier, unique within the tournament
    pub id: PlayerId,

    /// Display name, also the tie-break key among equal scores
    pub name: String,

    /// Cumulative score
    #[serde(default)]
    pub score: Score,

    /// Players already faced. Only ever grows.
    #[serde(default)]
    pub opponents: BTreeSet<PlayerId>,

    #[serde(default)]
    pub record: WinLossRecord,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: Score::ZERO,
            opponents: BTreeSet::new(),
            record: WinLossRecord::default(),
        }
    }

    /// Builder method to set a starting score.
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = score;
        self
    }

    /// Builder method to seed opponent history, e.g. when resuming a tournament.
    pub fn with_opponents<I, T>(mut self, opponents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PlayerId>,
    {
        self.opponents.extend(opponents.into_iter().map(Into::into));
        self
    }

    pub fn has_played(&self, other: &PlayerId) -> bool {
        self.opponents.contains(other)
    }

    /// True if neither player's history contains the other.
    pub fn can_face(&self, other: &Player) -> bool {
        self.id != other.id && !self.has_played(&other.id) && !other.has_played(&self.id)
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
