//! Command-line driver for the default policy.
//!
//! ## Usage
//!
//! - `default-policy` - Run one playout from the empty board
//! - `default-policy playout --games 100 --seed 7` - Run a batch of playouts
//! - `default-policy params` - Print the effective policy parameters

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info};

use default_policy::candidates::MoveType;
use default_policy::policy::{DefaultPolicy, PolicyParams};
use default_policy::position::Position;

/// Default policy for Go playouts
#[derive(Parser)]
#[command(name = "default-policy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log every playout step
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run playouts from the empty board
    Playout {
        /// Number of playouts to run
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Step bound per playout; negative plays to the end of the game
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        max_depth: i32,
        /// Seed of the random source
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Print the policy parameters
    Params {
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Args, Clone)]
struct ParamArgs {
    /// Allow self-atari for groups up to this many stones
    #[arg(long)]
    thres_allow_atari_stone: Option<u32>,
    /// Save our groups in atari with at least this many stones
    #[arg(long)]
    thres_save_atari: Option<u32>,
    /// Attack opponent groups with at most this many liberties
    #[arg(long)]
    thres_opponent_libs: Option<u32>,
    /// Attack opponent groups with at least this many stones
    #[arg(long)]
    thres_opponent_stones: Option<u32>,
    /// Disable a heuristic (ko_fight, opponent_in_danger, our_atari, nakade, pattern)
    #[arg(long = "disable", value_name = "HEURISTIC")]
    disabled: Vec<String>,
}

impl ParamArgs {
    fn to_params(&self) -> Result<PolicyParams> {
        let mut params = PolicyParams::default();
        if let Some(v) = self.thres_allow_atari_stone {
            params.thres_allow_atari_stone = v;
        }
        if let Some(v) = self.thres_save_atari {
            params.thres_save_atari = v;
        }
        if let Some(v) = self.thres_opponent_libs {
            params.thres_opponent_libs = v;
        }
        if let Some(v) = self.thres_opponent_stones {
            params.thres_opponent_stones = v;
        }
        for name in &self.disabled {
            let Some(kind) = MoveType::from_name(name) else {
                bail!("unknown heuristic '{name}'");
            };
            params.set_enabled(kind, false);
        }
        Ok(params)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    // RUST_LOG still overrides the default level.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Playout {
            games,
            max_depth,
            seed,
            params,
        }) => run_playouts(games, max_depth, seed, params.to_params()?),
        Some(Commands::Params { params }) => {
            print!("{}", params.to_params()?);
            Ok(())
        }
        None => run_playouts(1, -1, 1, PolicyParams::default()),
    }
}

fn run_playouts(games: usize, max_depth: i32, seed: u64, params: PolicyParams) -> Result<()> {
    let policy = DefaultPolicy::new(params);
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut finished = 0;
    let mut last_board = None;

    for game in 0..games {
        let mut pos = Position::new();
        let result = policy
            .run(&mut pos, None, max_depth, &mut || rng.u32(..))
            .with_context(|| format!("playout {game} aborted"))?;
        info!(
            "playout {game}: last move {}, {} moves, {}",
            result.last,
            result.steps,
            if result.game_ended { "game ended" } else { "truncated" }
        );
        if result.game_ended {
            finished += 1;
        }
        last_board = Some(pos);
    }

    println!("{finished}/{games} playouts reached two passes");
    if let Some(pos) = last_board {
        println!("{pos}");
    }
    Ok(())
}
