//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{StorageConfig, StorageError};
use crate::leaderboard::Standing;
use crate::models::{Match, Player, Round};
use crate::tournament::Tournament;

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Round,
    Match,
    Standing,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Round => "rounds.jsonl",
            EntityType::Match => "matches.jsonl",
            EntityType::Standing => "standings.jsonl",
        }
    }
}

/// Line-per-entity writer for one file.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Writer for `entity` in the tournament's export directory.
    pub fn for_entity(config: &StorageConfig, entity: EntityType, tournament_id: &str) -> Self {
        Self::new(config.tournament_dir(tournament_id).join(entity.filename()))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn open_append(&self) -> Result<BufWriter<File>, StorageError> {
        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(BufWriter::new(file))
    }

    /// Append one entity as a new line.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        let mut writer = self.open_append()?;
        writeln!(writer, "{}", serde_json::to_string(entity)?)?;
        writer.flush()?;
        Ok(())
    }

    /// Append several entities, one line each. Returns how many were written.
    pub fn append_batch<'a, I>(&self, entities: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut writer = self.open_append()?;
        let mut count = 0;
        for entity in entities {
            writeln!(writer, "{}", serde_json::to_string(entity)?)?;
            count += 1;
        }
        writer.flush()?;
        debug!("Appended {} entities to {:?}", count, self.path);
        Ok(count)
    }

    /// Replace the file with `entities`.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let mut writer = BufWriter::new(File::create(&self.path)?);
        for entity in entities {
            writeln!(writer, "{}", serde_json::to_string(entity)?)?;
        }
        writer.flush()?;

        debug!("Wrote {} entities to {:?}", entities.len(), self.path);
        Ok(entities.len())
    }
}

/// Line-per-entity reader for one file.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Reader for `entity` in the tournament's export directory.
    pub fn for_entity(config: &StorageConfig, entity: EntityType, tournament_id: &str) -> Self {
        Self::new(config.tournament_dir(tournament_id).join(entity.filename()))
    }

    /// Read every entity, failing on the first line that does not parse.
    /// Blank lines are ignored.
    pub fn read_strict(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entity = serde_json::from_str(&line).map_err(|source| StorageError::Line {
                path: self.path.clone(),
                line: i + 1,
                source,
            })?;
            entities.push(entity);
        }

        Ok(entities)
    }
}

/// Load a roster: one player object per line.
///
/// A bad line is an error here rather than skipped, since a dropped
/// player would silently change every pairing.
pub fn read_roster(path: &Path) -> Result<Vec<Player>, StorageError> {
    let players = JsonlReader::<Player>::new(path.to_path_buf()).read_strict()?;
    info!("Loaded {} player(s) from {:?}", players.len(), path);
    Ok(players)
}

/// Append a finished round to `rounds.jsonl` and its games to `matches.jsonl`.
pub fn append_round(config: &StorageConfig, tournament_id: &str, round: &Round) -> Result<(), StorageError> {
    JsonlWriter::<Round>::for_entity(config, EntityType::Round, tournament_id).append(round)?;
    JsonlWriter::<Match>::for_entity(config, EntityType::Match, tournament_id)
        .append_batch(&round.matches)?;
    debug!("Appended round {} of {}", round.number, tournament_id);
    Ok(())
}

/// Write standings, players and `tournament.json`, replacing earlier copies.
pub fn export_summary(config: &StorageConfig, tournament: &Tournament) -> Result<PathBuf, StorageError> {
    let id = tournament.id().as_str();
    let dir = config.tournament_dir(id);

    let players: Vec<Player> = tournament.registry().iter().cloned().collect();
    JsonlWriter::<Standing>::for_entity(config, EntityType::Standing, id)
        .write_all(&tournament.leaderboard())?;
    JsonlWriter::<Player>::for_entity(config, EntityType::Player, id).write_all(&players)?;

    let summary = serde_json::to_string_pretty(&tournament.summary())?;
    fs::write(dir.join("tournament.json"), summary)?;
    Ok(dir)
}

/// Write a full snapshot: every round and match so far, plus the summary files.
pub fn export_tournament(config: &StorageConfig, tournament: &Tournament) -> Result<PathBuf, StorageError> {
    let id = tournament.id().as_str();

    let mut rounds: Vec<Round> = tournament.rounds().to_vec();
    rounds.extend(tournament.current_round().cloned());
    let matches: Vec<Match> = rounds.iter().flat_map(|r| r.matches.iter().cloned()).collect();

    JsonlWriter::<Round>::for_entity(config, EntityType::Round, id).write_all(&rounds)?;
    JsonlWriter::<Match>::for_entity(config, EntityType::Match, id).write_all(&matches)?;
    let dir = export_summary(config, tournament)?;

    info!("Exported tournament {} to {:?}", tournament.name(), dir);
    Ok(dir)
}
