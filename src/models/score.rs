//! Tournament score in exact half points.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from converting a number into a [`Score`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("Score cannot be negative: {0}")]
    Negative(f64),

    #[error("Score must be a multiple of 0.5: {0}")]
    NotHalfPoint(f64),

    #[error("Score too large: {0}")]
    OutOfRange(f64),
}

/// A non-negative score counted in half points, so 1.5 is stored as 3.
///
/// Serialized as a plain JSON number (`1.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const HALF: Score = Score(1);
    pub const ONE: Score = Score(2);

    pub fn from_half_points(half_points: u32) -> Self {
        Self(half_points)
    }

    pub fn half_points(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score(self.0 + rhs.0)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.0 += rhs.0;
    }
}

/// Saturates at zero.
impl Sub for Score {
    type Output = Score;

    fn sub(self, rhs: Score) -> Score {
        Score(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, |acc, s| acc + s)
    }
}

impl<'a> Sum<&'a Score> for Score {
    fn sum<I: Iterator<Item = &'a Score>>(iter: I) -> Score {
        iter.copied().sum()
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        score.as_f64()
    }
}

impl TryFrom<f64> for Score {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value < 0.0 {
            return Err(ScoreError::Negative(value));
        }
        let doubled = value * 2.0;
        if doubled.is_nan() {
            return Err(ScoreError::NotHalfPoint(value));
        }
        if doubled > u32::MAX as f64 {
            return Err(ScoreError::OutOfRange(value));
        }
        if doubled.fract() != 0.0 {
            return Err(ScoreError::NotHalfPoint(value));
        }
        Ok(Score(doubled as u32))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_arithmetic() {
        let mut score = Score::ZERO;
        score += Score::ONE;
        score += Score::HALF;
        assert_eq!(score, Score::from_half_points(3));
        assert_eq!(score.as_f64(), 1.5);
        assert_eq!(Score::HALF - Score::ONE, Score::ZERO);
    }

    #[test]
    fn test_score_sum() {
        let scores = [Score::ONE, Score::HALF, Score::HALF];
        let total: Score = scores.iter().sum();
        assert_eq!(total, Score::from_half_points(4));
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::ZERO.to_string(), "0");
        assert_eq!(Score::HALF.to_string(), "0.5");
        assert_eq!(Score::from_half_points(7).to_string(), "3.5");
        assert_eq!(Score::from_half_points(6).to_string(), "3");
    }

    #[test]
    fn test_score_try_from_rejects_bad_values() {
        assert_eq!(Score::try_from(2.5), Ok(Score::from_half_points(5)));
        assert!(matches!(Score::try_from(-1.0), Err(ScoreError::Negative(_))));
        assert!(matches!(Score::try_from(0.3), Err(ScoreError::NotHalfPoint(_))));
        assert!(matches!(Score::try_from(f64::NAN), Err(ScoreError::NotHalfPoint(_))));
    }

    #[test]
    fn test_score_try_from_rejects_out_of_range() {
        let max = (u32::MAX / 2) as f64;
        assert_eq!(Score::try_from(max), Ok(Score::from_half_points(u32::MAX - 1)));
        assert!(matches!(Score::try_from(max + 1.0), Err(ScoreError::OutOfRange(_))));
        assert!(matches!(Score::try_from(f64::INFINITY), Err(ScoreError::OutOfRange(_))));
    }

    #[test]
    fn test_score_serializes_as_number() {
        let json = serde_json::to_string(&Score::from_half_points(3)).unwrap();
        assert_eq!(json, "1.5");

        let parsed: Score = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Score::from_half_points(4));
        assert!(serde_json::from_str::<Score>("0.25").is_err());
    }
}
