use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_arbiter::config::AppConfig;
use swiss_arbiter::host::{SharedTournament, TournamentHost};
use swiss_arbiter::leaderboard::{format_leaderboard, standings};
use swiss_arbiter::models::{PlayerId, Round};
use swiss_arbiter::pairing::pair_players;
use swiss_arbiter::registry::PlayerRegistry;
use swiss_arbiter::simulate::{roster, RandomOutcomes};
use swiss_arbiter::storage::{append_round, export_summary, read_roster, StorageConfig};
use swiss_arbiter::Tournament;

#[derive(Parser)]
#[command(name = "swiss-arbiter")]
#[command(about = "Swiss-system chess tournament pairing and standings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate tournaments with random results
    Simulate {
        /// Number of generated players
        #[arg(long)]
        players: Option<usize>,

        /// Rounds per tournament
        #[arg(long)]
        rounds: Option<u32>,

        /// RNG seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,

        /// Tournaments to run in parallel
        #[arg(long)]
        tournaments: Option<usize>,

        /// Tournament name
        #[arg(long)]
        name: Option<String>,

        /// Write rounds and standings to the data directory
        #[arg(long)]
        export: bool,
    },

    /// Print the next round's pairings for a roster
    Pair {
        /// JSONL roster, one player per line
        #[arg(long)]
        roster: PathBuf,
    },

    /// Print the leaderboard for a roster
    Standings {
        /// JSONL roster, one player per line
        #[arg(long)]
        roster: PathBuf,
    },

    /// Load and validate the configuration file
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting swiss-arbiter v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Simulate {
            players,
            rounds,
            seed,
            tournaments,
            name,
            export,
        } => {
            let sim = &mut config.simulation;
            sim.players = players.unwrap_or(sim.players);
            sim.seed = seed.or(sim.seed);
            sim.tournaments = tournaments.unwrap_or(sim.tournaments);
            let cup = &mut config.tournament;
            cup.rounds = rounds.unwrap_or(cup.rounds);
            if let Some(name) = name {
                cup.name = name;
            }
            config.validate()?;

            run_simulations(&config, export).await?;
        }
        Commands::Pair { roster } => {
            let registry = PlayerRegistry::from_players(read_roster(&roster)?)?;
            let pairing = pair_players(&registry.standings());

            println!("\n=== Pairings ===");
            for (board, (first, second)) in pairing.pairs.iter().enumerate() {
                println!(
                    "Board {}: {} vs {}",
                    board + 1,
                    display_name(&registry, first),
                    display_name(&registry, second)
                );
            }
            for id in &pairing.unpaired {
                println!("No opponent: {}", display_name(&registry, id));
            }
        }
        Commands::Standings { roster } => {
            let registry = PlayerRegistry::from_players(read_roster(&roster)?)?;
            println!("\n=== Standings ===");
            print!("{}", format_leaderboard(&standings(&registry)));
        }
        Commands::CheckConfig => {
            let config = AppConfig::from_file(&cli.config)?;
            println!("Configuration OK: {:?}", cli.config);
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run_simulations(config: &AppConfig, export: bool) -> Result<()> {
    let sim = &config.simulation;
    let host = TournamentHost::new();

    let mut shared = Vec::new();
    for i in 0..sim.tournaments {
        let name = if sim.tournaments == 1 {
            config.tournament.name.clone()
        } else {
            format!("{} #{}", config.tournament.name, i + 1)
        };
        let tournament = Tournament::new(name, config.tournament.rounds, roster(sim.players))?;
        let seed = sim.seed.map(|s| s.wrapping_add(i as u64));
        shared.push((host.insert(tournament).await?, seed));
    }

    let storage = StorageConfig::new(config.data_dir.clone());
    let verbose = sim.tournaments == 1;
    let mut handles = Vec::new();
    for (tournament, seed) in shared {
        let export_to = export.then(|| storage.clone());
        handles.push(tokio::spawn(simulate_one(tournament, seed, verbose, export_to)));
    }
    for handle in handles {
        handle.await??;
    }

    for id in host.ids().await {
        let Some(tournament) = host.get(&id).await else {
            continue;
        };
        let t = tournament.lock().await;

        println!("\n=== Final standings: {} ===", t.name());
        print!("{}", format_leaderboard(&t.leaderboard()));
        println!("Matches played: {}", t.resolved_match_count());

        if export {
            let dir = export_summary(&storage, &t)?;
            println!("Exported to {}", dir.display());
        }
    }
    Ok(())
}

/// Play one hosted tournament to the end. With `export_to`, each round is
/// appended to the export directory as soon as it completes.
async fn simulate_one(
    tournament: SharedTournament,
    seed: Option<u64>,
    verbose: bool,
    export_to: Option<StorageConfig>,
) -> Result<()> {
    let mut source = match seed {
        Some(seed) => RandomOutcomes::seeded(seed),
        None => RandomOutcomes::from_entropy(),
    };
    let mut t = tournament.lock().await;

    while !t.is_finished() {
        let number = t.play_round(&mut source)?;
        if let Some(round) = t.rounds().last() {
            if let Some(storage) = &export_to {
                append_round(storage, t.id().as_str(), round)?;
            }
            if verbose {
                print_round(t.registry(), round);
                print!("{}", format_leaderboard(&t.leaderboard()));
            }
        }
        tracing::debug!("Finished round {} of {}", number, t.name());
    }

    if !t.check_score_conservation() {
        anyhow::bail!("Score total does not match resolved matches in {}", t.name());
    }
    Ok(())
}

fn print_round(registry: &PlayerRegistry, round: &Round) {
    println!("\nRound {}", round.number);
    println!("Pairs:");
    for m in &round.matches {
        let result = m.outcome.map(|o| o.to_string()).unwrap_or_default();
        println!(
            "{} vs {}  {}",
            display_name(registry, &m.first),
            display_name(registry, &m.second),
            result
        );
    }
    for id in &round.unpaired {
        println!("{} has no opponent this round", display_name(registry, id));
    }
}

fn display_name<'a>(registry: &'a PlayerRegistry, id: &'a PlayerId) -> &'a str {
    registry
        .get(id)
        .map(|p| p.name.as_str())
        .unwrap_or_else(|| id.as_str())
}
