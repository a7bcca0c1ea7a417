//! Swiss pairing.
//!
//! Greedy first-fit over the standings: each unpaired player, in standings
//! order, takes the first later unpaired player they have not yet met.
//! This is not a maximum matching. A player can be left out even when a
//! different assignment would have paired everybody, and that behaviour is
//! kept as is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::leaderboard::standing_order;
use crate::models::{Player, PlayerId};

/// Pairings for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPairing {
    /// (first, second); the higher-standing player is first
    pub pairs: Vec<(PlayerId, PlayerId)>,

    /// Players left without an opponent, in standings order
    pub unpaired: Vec<PlayerId>,
}

impl RoundPairing {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pair players for one round.
///
/// The input does not need to be sorted; it is re-sorted by the standings
/// key so identical input always yields identical pairings. Never fails.
pub fn pair_players(players: &[&Player]) -> RoundPairing {
    let mut sorted: Vec<&Player> = players.to_vec();
    sorted.sort_by(|a, b| standing_order(a, b));

    let mut paired = vec![false; sorted.len()];
    let mut result = RoundPairing::default();

    for i in 0..sorted.len() {
        if paired[i] {
            continue;
        }
        let p = sorted[i];
        let opponent = (i + 1..sorted.len()).find(|&j| !paired[j] && p.can_face(sorted[j]));

        match opponent {
            Some(j) => {
                paired[i] = true;
                paired[j] = true;
                debug!("Paired {} vs {}", p.name, sorted[j].name);
                result.pairs.push((p.id.clone(), sorted[j].id.clone()));
            }
            None => {
                debug!("No eligible opponent for {}", p.name);
                result.unpaired.push(p.id.clone());
            }
        }
    }

    result
}
