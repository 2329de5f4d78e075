use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use warboard_app::config::AppConfig;
use warboard_app::error::AppError;
use warboard_app::runner::{self, MatchSummary};

/// Play a WarBoard match with the autopilot on the human side and print a
/// JSON summary.
#[derive(Parser, Debug)]
#[command(name = "warboard")]
#[command(about = "Run a WarBoard match and print a JSON summary")]
struct Args {
    /// TOML file with [rules] and [match] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Country for the human (autopilot) side
    #[arg(long)]
    player: Option<String>,

    /// Country for the computer side
    #[arg(long)]
    adversary: Option<String>,

    /// Maximum ticks before the run is cut off
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Run through the game loop thread at the real tick rate
    #[arg(long)]
    realtime: bool,
}

fn run(args: Args) -> Result<MatchSummary, AppError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.matchup.seed = seed;
    }
    if let Some(player) = args.player {
        config.matchup.player = player;
    }
    if let Some(adversary) = args.adversary {
        config.matchup.adversary = adversary;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.matchup.max_ticks = max_ticks;
    }

    tracing::info!(
        player = %config.matchup.player,
        adversary = %config.matchup.adversary,
        seed = config.matchup.seed,
        realtime = args.realtime,
        "starting match"
    );
    if args.realtime {
        runner::run_realtime(&config)
    } else {
        runner::run_headless(&config)
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize summary");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
