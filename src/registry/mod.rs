//! Player registry.
//!
//! Owns every player of one tournament. Players are kept in insertion order
//! and indexed by ID. Scores and histories are only written through the
//! resolver, so mutable access stays crate-private.

use std::collections::HashMap;

use thiserror::Error;

use crate::leaderboard;
use crate::models::{Player, PlayerId, Score};

/// Errors from building or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate player id: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player cannot face themselves: {0}")]
    SelfPairing(PlayerId),
}

#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting repeated IDs.
    pub fn from_players(players: Vec<Player>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for player in players {
            registry.insert(player)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, player: Player) -> Result<(), RegistryError> {
        if self.index.contains_key(&player.id) {
            return Err(RegistryError::DuplicatePlayer(player.id));
        }
        self.index.insert(player.id.clone(), self.players.len());
        self.players.push(player);
        Ok(())
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    /// Mutable access to two distinct players at once.
    pub(crate) fn get_pair_mut(
        &mut self,
        a: &PlayerId,
        b: &PlayerId,
    ) -> Result<(&mut Player, &mut Player), RegistryError> {
        let ia = *self
            .index
            .get(a)
            .ok_or_else(|| RegistryError::UnknownPlayer(a.clone()))?;
        let ib = *self
            .index
            .get(b)
            .ok_or_else(|| RegistryError::UnknownPlayer(b.clone()))?;
        if ia == ib {
            return Err(RegistryError::SelfPairing(a.clone()));
        }

        if ia < ib {
            let (left, right) = self.players.split_at_mut(ib);
            Ok((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.players.split_at_mut(ia);
            Ok((&mut right[0], &mut left[ib]))
        }
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Snapshot in standings order. This is the pairing engine's input.
    pub fn standings(&self) -> Vec<&Player> {
        leaderboard::rank(self.players.iter())
    }

    pub fn total_score(&self) -> Score {
        self.players.iter().map(|p| p.score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerRegistry {
        PlayerRegistry::from_players(vec![
            Player::new("1", "Carol"),
            Player::new("2", "Alice").with_score(Score::HALF),
            Player::new("3", "Bob"),
        ])
        .unwrap()
    }

    #[test]
    fn test_registry_lookup() {
        let registry = sample();

        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.get(&PlayerId::from("2")).unwrap().name, "Alice");
        assert!(registry.get(&PlayerId::from("9")).is_none());
        assert!(registry.contains(&PlayerId::from("3")));
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let result = PlayerRegistry::from_players(vec![
            Player::new("1", "Alice"),
            Player::new("1", "Impostor"),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicatePlayer(id)) if id.as_str() == "1"));
    }

    #[test]
    fn test_registry_iter_keeps_insertion_order() {
        let registry = sample();
        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_registry_standings_order() {
        let registry = sample();
        let names: Vec<&str> = registry.standings().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_get_pair_mut_either_order() {
        let mut registry = sample();
        let (a, b) = registry
            .get_pair_mut(&PlayerId::from("3"), &PlayerId::from("1"))
            .unwrap();
        assert_eq!(a.name, "Bob");
        assert_eq!(b.name, "Carol");

        assert!(matches!(
            registry.get_pair_mut(&PlayerId::from("1"), &PlayerId::from("1")),
            Err(RegistryError::SelfPairing(_))
        ));
        assert!(matches!(
            registry.get_pair_mut(&PlayerId::from("1"), &PlayerId::from("x")),
            Err(RegistryError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_registry_total_score() {
        assert_eq!(sample().total_score(), Score::HALF);
        assert_eq!(PlayerRegistry::new().total_score(), Score::ZERO);
    }
}
