//! # Swiss Arbiter
//!
//! Swiss-system pairing and scoring for multi-round chess tournaments.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, scores, outcomes, matches, rounds)
//! - **registry**: The player registry a tournament owns
//! - **pairing**: Greedy score-group pairing without rematches
//! - **resolve**: Applies match outcomes to players
//! - **tournament**: Round lifecycle controller
//! - **leaderboard**: Ranked standings
//! - **simulate**: Outcome sources for simulated play
//! - **host**: Many tournaments, one lock each
//! - **storage**: JSONL rosters and exports
//! - **config**: Configuration loading and validation

pub mod config;
pub mod host;
pub mod leaderboard;
pub mod models;
pub mod pairing;
pub mod registry;
pub mod resolve;
pub mod simulate;
pub mod storage;
pub mod tournament;

pub use models::*;
pub use tournament::{Tournament, TournamentError, TournamentState};
