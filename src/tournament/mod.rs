//! Tournament controller.
//!
//! Drives the round lifecycle:
//!
//! ```text
//! NotStarted -> RoundInProgress(1) -> RoundComplete(1) -> RoundInProgress(2) -> ... -> Finished
//! ```
//!
//! Each round is paired fresh from the registry's cumulative standings.
//! A round completes once every match in it is resolved; completing the
//! final round finishes the tournament, after which no further rounds are
//! paired.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::leaderboard::{self, Standing};
use crate::models::{EntityId, Match, MatchId, Outcome, Player, PlayerId, Round, Score, TournamentId};
use crate::pairing::pair_players;
use crate::registry::{PlayerRegistry, RegistryError};
use crate::resolve::{resolve, ResolveError};
use crate::simulate::OutcomeSource;

/// Errors from driving a tournament.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Invalid round count: {0} (must be at least 1)")]
    InvalidRoundCount(u32),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Round {0} is still in progress")]
    RoundInProgress(u32),

    #[error("No round is in progress")]
    NoRoundInProgress,

    #[error("Match {0} is not part of the current round")]
    UnknownMatch(MatchId),

    #[error("Tournament is finished")]
    Finished,
}

/// Round lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "round", rename_all = "snake_case")]
pub enum TournamentState {
    NotStarted,
    RoundInProgress(u32),
    RoundComplete(u32),
    Finished,
}

impl std::fmt::Display for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentState::NotStarted => write!(f, "not started"),
            TournamentState::RoundInProgress(n) => write!(f, "round {} in progress", n),
            TournamentState::RoundComplete(n) => write!(f, "round {} complete", n),
            TournamentState::Finished => write!(f, "finished"),
        }
    }
}

/// Serializable overview of a tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub total_rounds: u32,
    pub state: TournamentState,
    pub rounds_completed: usize,
    pub matches_resolved: usize,
    pub player_count: usize,
}

/// A Swiss tournament: its players, its rounds and where it is in the lifecycle.
#[derive(Debug, Clone)]
pub struct Tournament {
    id: TournamentId,
    name: String,
    created_at: DateTime<Utc>,
    total_rounds: u32,
    registry: PlayerRegistry,
    completed: Vec<Round>,
    current: Option<Round>,
    state: TournamentState,
    starting_total: Score,
}

impl Tournament {
    /// Create a tournament with an ID derived from its name and creation time.
    pub fn new(
        name: impl Into<String>,
        total_rounds: u32,
        players: Vec<Player>,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let created_at = Utc::now();
        let id = EntityId::generate(&[name.as_str(), created_at.to_rfc3339().as_str()]);
        Self::build(id, name, created_at, total_rounds, players)
    }

    /// Create a tournament under a host-supplied ID.
    pub fn with_id(
        id: TournamentId,
        name: impl Into<String>,
        total_rounds: u32,
        players: Vec<Player>,
    ) -> Result<Self, TournamentError> {
        Self::build(id, name.into(), Utc::now(), total_rounds, players)
    }

    fn build(
        id: TournamentId,
        name: String,
        created_at: DateTime<Utc>,
        total_rounds: u32,
        players: Vec<Player>,
    ) -> Result<Self, TournamentError> {
        if total_rounds == 0 {
            return Err(TournamentError::InvalidRoundCount(total_rounds));
        }
        let registry = PlayerRegistry::from_players(players)?;
        if registry.len() < 2 {
            warn!(
                "Tournament {} has {} player(s); rounds will have no pairings",
                name,
                registry.len()
            );
        }
        let starting_total = registry.total_score();

        Ok(Self {
            id,
            name,
            created_at,
            total_rounds,
            registry,
            completed: Vec::new(),
            current: None,
            state: TournamentState::NotStarted,
            starting_total,
        })
    }

    pub fn id(&self) -> &TournamentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == TournamentState::Finished
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn has_enough_players(&self) -> bool {
        self.registry.len() >= 2
    }

    /// Completed rounds, oldest first.
    pub fn rounds(&self) -> &[Round] {
        &self.completed
    }

    /// The round currently being played, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// Pairings of the round in progress.
    pub fn current_pairings(&self) -> Vec<(PlayerId, PlayerId)> {
        self.current.as_ref().map(Round::pairings).unwrap_or_default()
    }

    /// Matches of the round in progress still awaiting a result.
    pub fn pending_matches(&self) -> Vec<&Match> {
        match &self.current {
            Some(round) => round.pending().collect(),
            None => Vec::new(),
        }
    }

    pub fn leaderboard(&self) -> Vec<Standing> {
        leaderboard::standings(&self.registry)
    }

    pub fn resolved_match_count(&self) -> usize {
        self.completed
            .iter()
            .chain(self.current.iter())
            .map(Round::resolved_count)
            .sum()
    }

    /// Every resolved match hands out exactly one point.
    pub fn check_score_conservation(&self) -> bool {
        let distributed = Score::from_half_points(2 * self.resolved_match_count() as u32);
        self.registry.total_score() == self.starting_total + distributed
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            total_rounds: self.total_rounds,
            state: self.state,
            rounds_completed: self.completed.len(),
            matches_resolved: self.resolved_match_count(),
            player_count: self.registry.len(),
        }
    }

    /// Pair the next round and return its pairings.
    ///
    /// A round with no possible pairings completes immediately.
    pub fn begin_round(&mut self) -> Result<Vec<(PlayerId, PlayerId)>, TournamentError> {
        let number = self.open_round()?;
        let round = self
            .current
            .as_ref()
            .or_else(|| self.completed.last())
            .filter(|r| r.number == number);
        Ok(round.map(Round::pairings).unwrap_or_default())
    }

    fn open_round(&mut self) -> Result<u32, TournamentError> {
        let number = match self.state {
            TournamentState::NotStarted => 1,
            TournamentState::RoundComplete(n) => n + 1,
            TournamentState::RoundInProgress(n) => return Err(TournamentError::RoundInProgress(n)),
            TournamentState::Finished => return Err(TournamentError::Finished),
        };

        let pairing = pair_players(&self.registry.standings());
        if !pairing.unpaired.is_empty() {
            warn!(
                "Round {}: {} player(s) without an opponent",
                number,
                pairing.unpaired.len()
            );
        }

        let matches: Vec<Match> = pairing
            .pairs
            .into_iter()
            .map(|(first, second)| Match::new(&self.id, number, first, second))
            .collect();

        info!(
            "Starting round {}/{} of {} with {} match(es)",
            number,
            self.total_rounds,
            self.name,
            matches.len()
        );

        self.current = Some(Round::new(number, matches, pairing.unpaired));
        self.state = TournamentState::RoundInProgress(number);

        if self.current.as_ref().is_some_and(Round::is_complete) {
            self.complete_round();
        }
        Ok(number)
    }

    /// Record and apply the result of one match in the round in progress.
    pub fn submit_result(&mut self, match_id: &MatchId, outcome: Outcome) -> Result<(), TournamentError> {
        match self.state {
            TournamentState::RoundInProgress(_) => {}
            TournamentState::Finished => return Err(TournamentError::Finished),
            _ => return Err(TournamentError::NoRoundInProgress),
        }
        let round = self
            .current
            .as_mut()
            .ok_or(TournamentError::NoRoundInProgress)?;
        let m = round
            .get_match_mut(match_id)
            .ok_or_else(|| TournamentError::UnknownMatch(match_id.clone()))?;
        if m.resolved {
            return Err(ResolveError::AlreadyResolved(match_id.clone()).into());
        }

        m.outcome = Some(outcome);
        if let Err(e) = resolve(&mut self.registry, m) {
            m.outcome = None;
            return Err(e.into());
        }

        if round.is_complete() {
            self.complete_round();
        }
        Ok(())
    }

    fn complete_round(&mut self) {
        let Some(round) = self.current.take() else {
            return;
        };
        let number = round.number;
        self.completed.push(round);

        self.state = if number >= self.total_rounds {
            TournamentState::Finished
        } else {
            TournamentState::RoundComplete(number)
        };

        if let Some(leader) = self.registry.standings().first() {
            debug!("Leader after round {}: {} ({})", number, leader.name, leader.score);
        }
        info!("Round {} of {} complete ({})", number, self.name, self.state);
    }

    /// Play one round with outcomes from `source`.
    ///
    /// Pairs a new round unless one is already open, then resolves every
    /// pending match. Returns the round number.
    pub fn play_round<S>(&mut self, source: &mut S) -> Result<u32, TournamentError>
    where
        S: OutcomeSource + ?Sized,
    {
        let number = match self.state {
            TournamentState::RoundInProgress(n) => n,
            _ => self.open_round()?,
        };

        let pending: Vec<MatchId> = self.pending_matches().iter().map(|m| m.id.clone()).collect();
        for id in pending {
            let outcome = match self.current.as_ref().and_then(|r| r.get_match(&id)) {
                Some(m) => source.outcome(m, &self.registry),
                None => return Err(TournamentError::UnknownMatch(id)),
            };
            self.submit_result(&id, outcome)?;
        }
        Ok(number)
    }

    /// Play every remaining round.
    pub fn run<S>(&mut self, source: &mut S) -> Result<(), TournamentError>
    where
        S: OutcomeSource + ?Sized,
    {
        while !self.is_finished() {
            self.play_round(source)?;
        }
        Ok(())
    }
}
