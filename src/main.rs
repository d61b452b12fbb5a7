//! Paddle Duel entry point
//!
//! Loads a policy checkpoint and plays it against the computer opponent at the
//! fixed tick rate, then prints a JSON summary of the session.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use paddle_duel::{
    Driver, EnemyMode, EnvConfig, PaddleEnv, Policy, Scoreboard, TrackBall, load_checkpoint,
};

#[derive(Debug, Parser)]
#[command(
    name = "paddle-duel",
    about = "Play a trained paddle policy against the computer opponent",
    version
)]
struct Args {
    /// Policy checkpoint (JSON). Required unless --scripted is given.
    checkpoint: Option<PathBuf>,

    /// Use the built-in ball-tracking policy instead of a checkpoint.
    #[arg(long, conflicts_with = "checkpoint")]
    scripted: bool,

    /// Number of episodes to play.
    #[arg(long, default_value_t = 10)]
    episodes: u32,

    /// Seed for the environment RNG.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Arena config file (JSON); defaults apply for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace the loop at the tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// End an episode as a draw after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Verbosity: -v, -vv
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: &Args) -> Result<Scoreboard, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    if config.enemy_mode == EnemyMode::Human {
        log::warn!("No input device in headless mode; playing the computer opponent instead");
        config.enemy_mode = EnemyMode::Computer;
    }

    let policy: Box<dyn Policy> = match (&args.checkpoint, args.scripted) {
        (_, true) => Box::new(TrackBall::default()),
        (Some(path), false) => Box::new(load_checkpoint(path)?),
        (None, false) => return Err("no checkpoint given (pass a path or --scripted)".into()),
    };
    log::info!(
        "Paddle Duel starting: policy {}, {} episodes, seed {}",
        policy.name(),
        args.episodes,
        args.seed
    );

    let env = PaddleEnv::from_config(config, args.seed)?;
    let mut driver = Driver::new(env, policy).with_max_ticks(args.max_ticks);
    Ok(driver.run(args.episodes, args.realtime).clone())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(scoreboard) => {
            log::info!(
                "Won {} of {} episodes ({:.1}%)",
                scoreboard.wins,
                scoreboard.episodes(),
                scoreboard.win_rate() * 100.0
            );
            match serde_json::to_string_pretty(&scoreboard) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Failed to encode summary: {err}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
