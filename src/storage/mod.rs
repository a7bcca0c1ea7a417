//! Filesystem storage.
//!
//! Rosters are read from JSONL. Tournaments are exported under
//! `<data_dir>/tournaments/<id>/`, either round by round as they are played
//! or as a single snapshot.

pub mod jsonl;

pub use jsonl::{
    append_round, export_summary, export_tournament, read_roster, EntityType, JsonlReader,
    JsonlWriter,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bad entry at {path:?} line {line}: {source}")]
    Line {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournaments_dir(&self) -> PathBuf {
        self.data_dir.join("tournaments")
    }

    pub fn tournament_dir(&self, tournament_id: &str) -> PathBuf {
        self.tournaments_dir().join(tournament_id)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
