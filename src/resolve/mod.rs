//! Match resolution.
//!
//! Applies a match outcome to both players: score, win/loss/draw record and
//! opponent history. A match is applied at most once; the `resolved` flag on
//! the match is the guard.

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::models::{Match, MatchId, Outcome};
use crate::registry::{PlayerRegistry, RegistryError};

/// Errors that can occur while resolving a match.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Match {0} has already been resolved")]
    AlreadyResolved(MatchId),

    #[error("Match {0} has no outcome to apply")]
    MissingOutcome(MatchId),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Apply a match to the registry and mark it resolved.
///
/// On error nothing is written, neither to the registry nor to the match.
pub fn resolve(registry: &mut PlayerRegistry, m: &mut Match) -> Result<(), ResolveError> {
    if m.resolved {
        return Err(ResolveError::AlreadyResolved(m.id.clone()));
    }
    let outcome = m.outcome.ok_or_else(|| ResolveError::MissingOutcome(m.id.clone()))?;

    let (first, second) = registry.get_pair_mut(&m.first, &m.second)?;
    let (first_points, second_points) = outcome.points();
    first.score += first_points;
    second.score += second_points;

    match outcome {
        Outcome::FirstWins => {
            first.record.wins += 1;
            second.record.losses += 1;
        }
        Outcome::SecondWins => {
            first.record.losses += 1;
            second.record.wins += 1;
        }
        Outcome::Draw => {
            first.record.draws += 1;
            second.record.draws += 1;
        }
    }

    first.opponents.insert(second.id.clone());
    second.opponents.insert(first.id.clone());

    m.resolved = true;
    m.played_at = Some(Utc::now());

    debug!(
        "Resolved round {} {} vs {}: {}",
        m.round, first.name, second.name, outcome
    );
    Ok(())
}
