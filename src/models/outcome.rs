//! Match outcomes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Score;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognised match result: {0:?} (expected 1-0, 0-1, 1/2-1/2 or draw)")]
pub struct OutcomeParseError(pub String);

/// Result of a single game, from the first (white) player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    FirstWins,
    Draw,
    SecondWins,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::FirstWins, Outcome::Draw, Outcome::SecondWins];

    /// Legacy integer code: 1 = first wins, 0 = draw, -1 = second wins.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Outcome::FirstWins),
            0 => Some(Outcome::Draw),
            -1 => Some(Outcome::SecondWins),
            _ => None,
        }
    }

    pub fn code(&self) -> i8 {
        match self {
            Outcome::FirstWins => 1,
            Outcome::Draw => 0,
            Outcome::SecondWins => -1,
        }
    }

    /// Points awarded as (first, second). Always sums to one point.
    pub fn points(&self) -> (Score, Score) {
        match self {
            Outcome::FirstWins => (Score::ONE, Score::ZERO),
            Outcome::Draw => (Score::HALF, Score::HALF),
            Outcome::SecondWins => (Score::ZERO, Score::ONE),
        }
    }
}

impl FromStr for Outcome {
    type Err = OutcomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1-0" | "first" | "white" => Ok(Outcome::FirstWins),
            "0-1" | "second" | "black" => Ok(Outcome::SecondWins),
            "1/2-1/2" | "½-½" | "draw" | "=" => Ok(Outcome::Draw),
            _ => Err(OutcomeParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::FirstWins => write!(f, "1-0"),
            Outcome::Draw => write!(f, "1/2-1/2"),
            Outcome::SecondWins => write!(f, "0-1"),
        }
    }
}
