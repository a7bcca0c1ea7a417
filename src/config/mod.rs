//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tournament defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Total rounds, fixed before round one
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Upper bound accepted for `rounds`
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

fn default_name() -> String {
    "Swiss Cup".to_string()
}

fn default_rounds() -> u32 {
    7
}

fn default_max_rounds() -> u32 {
    11
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            rounds: default_rounds(),
            max_rounds: default_max_rounds(),
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generated roster size
    #[serde(default = "default_players")]
    pub players: usize,

    /// RNG seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tournaments to run side by side
    #[serde(default = "default_tournaments")]
    pub tournaments: usize,
}

fn default_players() -> usize {
    20
}

fn default_tournaments() -> usize {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            seed: None,
            tournaments: default_tournaments(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tournament: TournamentConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            tournament: TournamentConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rounds(self.tournament.rounds, self.tournament.max_rounds)?;

        if self.simulation.tournaments == 0 {
            return Err(ConfigError::ValidationError(
                "Simulation must run at least one tournament".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check a round count against the configured ceiling.
pub fn validate_rounds(rounds: u32, max_rounds: u32) -> Result<(), ConfigError> {
    if rounds == 0 {
        return Err(ConfigError::ValidationError(
            "Round count must be greater than 0".to_string(),
        ));
    }
    if rounds > max_rounds {
        return Err(ConfigError::ValidationError(format!(
            "Round count {} exceeds the maximum of {}",
            rounds, max_rounds
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tournament.rounds, 7);
        assert_eq!(config.tournament.max_rounds, 11);
        assert_eq!(config.simulation.players, 20);
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_rounds() {
        let mut config = AppConfig::default();
        config.tournament.rounds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_too_many_rounds() {
        let mut config = AppConfig::default();
        config.tournament.rounds = 12;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("12")
        ));
    }

    #[test]
    fn test_config_validation_zero_tournaments() {
        let mut config = AppConfig::default();
        config.simulation.tournaments = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [tournament]
            rounds = 5

            [simulation]
            seed = 99
            "#,
        )
        .unwrap();

        assert_eq!(config.tournament.rounds, 5);
        assert_eq!(config.tournament.name, "Swiss Cup");
        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.simulation.players, 20);
    }

    #[test]
    fn test_from_file_and_fallback() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let missing = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(missing.tournament.rounds, 7);

        std::fs::write(&path, "log_level = \"debug\"\n[tournament]\nrounds = 3\n").unwrap();
        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.tournament.rounds, 3);

        std::fs::write(&path, "[tournament]\nrounds = 0\n").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.tournament.rounds, parsed.tournament.rounds);
    }
}
