//! Multi-tournament host.
//!
//! Each tournament sits behind its own mutex, so results for one tournament
//! are applied one at a time while different tournaments proceed in
//! parallel. The outer map lock is only held long enough to look up or
//! insert an entry.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::models::TournamentId;
use crate::tournament::Tournament;

pub type SharedTournament = Arc<Mutex<Tournament>>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Tournament already hosted: {0}")]
    AlreadyHosted(TournamentId),
}

#[derive(Clone, Default)]
pub struct TournamentHost {
    tournaments: Arc<RwLock<HashMap<TournamentId, SharedTournament>>>,
}

impl TournamentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tournament. An ID that is already hosted is rejected and
    /// the hosted tournament is left as it was.
    pub async fn insert(&self, tournament: Tournament) -> Result<SharedTournament, HostError> {
        let mut tournaments = self.tournaments.write().await;
        let id = tournament.id().clone();
        if tournaments.contains_key(&id) {
            warn!("Rejected second tournament with ID {}", id);
            return Err(HostError::AlreadyHosted(id));
        }

        info!("Hosting tournament {} ({})", tournament.name(), id);
        let shared = Arc::new(Mutex::new(tournament));
        tournaments.insert(id, shared.clone());
        Ok(shared)
    }

    pub async fn get(&self, id: &TournamentId) -> Option<SharedTournament> {
        self.tournaments.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &TournamentId) -> Option<SharedTournament> {
        self.tournaments.write().await.remove(id)
    }

    /// Hosted IDs, sorted.
    pub async fn ids(&self) -> Vec<TournamentId> {
        let mut ids: Vec<TournamentId> = self.tournaments.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.tournaments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tournaments.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use crate::simulate::{roster, RandomOutcomes};
    use crate::tournament::TournamentState;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let host = TournamentHost::new();
        assert!(host.is_empty().await);

        let t = Tournament::with_id("t1".into(), "One", 1, roster(4)).unwrap();
        host.insert(t).await.unwrap();

        assert_eq!(host.len().await, 1);
        let shared = host.get(&"t1".into()).await.unwrap();
        assert_eq!(shared.lock().await.name(), "One");
        assert!(host.get(&"t2".into()).await.is_none());

        assert!(host.remove(&"t1".into()).await.is_some());
        assert!(host.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_id_keeps_hosted_tournament() {
        let host = TournamentHost::new();
        let first = host
            .insert(Tournament::with_id("dup".into(), "First", 2, roster(4)).unwrap())
            .await
            .unwrap();
        first.lock().await.begin_round().unwrap();

        let second = Tournament::with_id("dup".into(), "Second", 2, roster(6)).unwrap();
        assert!(matches!(
            host.insert(second).await,
            Err(HostError::AlreadyHosted(id)) if id.as_str() == "dup"
        ));

        assert_eq!(host.len().await, 1);
        let hosted = host.get(&"dup".into()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &hosted));
        let t = hosted.lock().await;
        assert_eq!(t.name(), "First");
        assert_eq!(t.state(), TournamentState::RoundInProgress(1));
    }

    #[tokio::test]
    async fn test_tournaments_run_in_parallel() {
        let host = TournamentHost::new();
        for i in 0..4u64 {
            let t = Tournament::with_id(i.into(), format!("Cup {}", i), 5, roster(10)).unwrap();
            host.insert(t).await.unwrap();
        }

        let mut handles = Vec::new();
        for id in host.ids().await {
            let shared = host.get(&id).await.unwrap();
            handles.push(tokio::spawn(async move {
                let mut t = shared.lock().await;
                let seed = id.as_str().parse::<u64>().unwrap_or(0);
                let result = t.run(&mut RandomOutcomes::seeded(seed));
                result.map(|_| t.check_score_conservation())
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }
        for id in host.ids().await {
            assert!(host.get(&id).await.unwrap().lock().await.is_finished());
        }
    }

    #[tokio::test]
    async fn test_concurrent_results_on_one_tournament_are_serialized() {
        let host = TournamentHost::new();
        let shared = host
            .insert(Tournament::with_id("s".into(), "Shared", 1, roster(8)).unwrap())
            .await
            .unwrap();
        let ids: Vec<_> = {
            let mut t = shared.lock().await;
            t.begin_round().unwrap();
            let ids: Vec<_> = t.pending_matches().iter().map(|m| m.id.clone()).collect();
            ids
        };

        let mut handles = Vec::new();
        for id in ids {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                shared.lock().await.submit_result(&id, Outcome::FirstWins)
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let t = shared.lock().await;
        assert!(t.is_finished());
        assert_eq!(t.resolved_match_count(), 4);
        assert!(t.check_score_conservation());
    }
}
