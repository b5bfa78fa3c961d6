use std::path::PathBuf;

use agent::{play_match, Client, Engine, EngineConfig, MatchReport, OpponentKind};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agent")]
#[command(about = "Adaptive rock-paper-scissors opponent model")]
struct Cli {
    /// JSON engine config; missing fields take their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed for the engine and the scripted opponent
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match against a scripted opponent
    Play {
        #[arg(long)]
        opponent: OpponentKind,
        #[arg(long, default_value = "25")]
        rounds: usize,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a match against every scripted opponent
    Duel {
        #[arg(long, default_value = "25")]
        rounds: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match cli.command {
        Commands::Play {
            opponent,
            rounds,
            json,
        } => {
            let report = run(&config, opponent, rounds)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
        }
        Commands::Duel { rounds } => {
            for opponent in OpponentKind::ALL {
                let report = run(&config, opponent, rounds)?;
                print_summary(&report);
            }
        }
    }
    Ok(())
}

fn run(config: &EngineConfig, opponent: OpponentKind, rounds: usize) -> anyhow::Result<MatchReport> {
    let mut engine = Engine::new(config.clone())?;
    let mut opponent_rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut client = Client::new(opponent.build());
    Ok(play_match(&mut engine, &mut client, rounds, &mut opponent_rng)?)
}

fn print_summary(report: &MatchReport) {
    let rate = report
        .win_rate()
        .map_or_else(|| "-".to_owned(), |r| format!("{:.0}%", r * 100.0));
    println!(
        "{:<10} rounds={:<4} won={:<4} lost={:<4} drawn={:<4} win-rate={}",
        report.opponent, report.rounds, report.engine_wins, report.opponent_wins, report.draws, rate
    );
}
