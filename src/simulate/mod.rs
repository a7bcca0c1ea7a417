//! Outcome sources.
//!
//! The tournament never decides results itself. A host either submits
//! results one match at a time or hands the controller an [`OutcomeSource`].

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::{Match, Outcome, Player};
use crate::registry::PlayerRegistry;

/// Decides the outcome of a match.
pub trait OutcomeSource {
    fn outcome(&mut self, m: &Match, registry: &PlayerRegistry) -> Outcome;
}

/// Uniformly random outcomes.
pub struct RandomOutcomes {
    rng: StdRng,
}

impl RandomOutcomes {
    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl OutcomeSource for RandomOutcomes {
    fn outcome(&mut self, _m: &Match, _registry: &PlayerRegistry) -> Outcome {
        Outcome::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Outcome::Draw)
    }
}

/// The same outcome for every match.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub Outcome);

impl OutcomeSource for FixedOutcome {
    fn outcome(&mut self, _m: &Match, _registry: &PlayerRegistry) -> Outcome {
        self.0
    }
}

/// Outcomes taken in order from a queue; draws once it runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcomes {
    queue: VecDeque<Outcome>,
}

impl ScriptedOutcomes {
    pub fn new<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        Self {
            queue: outcomes.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn outcome(&mut self, _m: &Match, _registry: &PlayerRegistry) -> Outcome {
        self.queue.pop_front().unwrap_or(Outcome::Draw)
    }
}

/// Generated roster: `Player 0` .. `Player n-1` with IDs `0` .. `n-1`.
pub fn roster(count: usize) -> Vec<Player> {
    (0..count as u64)
        .map(|i| Player::new(i, format!("Player {}", i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TournamentId;

    fn dummy() -> (Match, PlayerRegistry) {
        let m = Match::new(&TournamentId::from("t"), 1, "0".into(), "1".into());
        let registry = PlayerRegistry::from_players(roster(2)).unwrap();
        (m, registry)
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let (m, registry) = dummy();
        let mut a = RandomOutcomes::seeded(7);
        let mut b = RandomOutcomes::seeded(7);

        let first: Vec<Outcome> = (0..32).map(|_| a.outcome(&m, &registry)).collect();
        let second: Vec<Outcome> = (0..32).map(|_| b.outcome(&m, &registry)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_produces_every_outcome() {
        let (m, registry) = dummy();
        let mut source = RandomOutcomes::seeded(42);
        let seen: Vec<Outcome> = (0..300).map(|_| source.outcome(&m, &registry)).collect();
        for outcome in Outcome::ALL {
            assert!(seen.contains(&outcome), "never produced {:?}", outcome);
        }
    }

    #[test]
    fn test_scripted_then_draws() {
        let (m, registry) = dummy();
        let mut source = ScriptedOutcomes::new([Outcome::FirstWins, Outcome::SecondWins]);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.outcome(&m, &registry), Outcome::FirstWins);
        assert_eq!(source.outcome(&m, &registry), Outcome::SecondWins);
        assert_eq!(source.outcome(&m, &registry), Outcome::Draw);
    }

    #[test]
    fn test_roster() {
        let players = roster(3);
        assert_eq!(players.len(), 3);
        assert_eq!(players[2].id.as_str(), "2");
        assert_eq!(players[2].name, "Player 2");
    }
}
