//! Paddy CLI - play the rice-paddy territory game or simulate matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Paddy - a turn-based rice-paddy territory game
#[derive(Parser, Debug)]
#[command(name = "paddy")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play against the scripted opponent
    Play {
        /// Board size (asked interactively when omitted)
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Resume the saved game
        #[arg(short, long, conflicts_with = "size")]
        load: bool,

        /// Opponent seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Snapshot file (default: game.save)
        #[arg(long)]
        save_path: Option<PathBuf>,

        /// History export file (default: history.csv)
        #[arg(long)]
        export_path: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable colored board output
        #[arg(long)]
        no_color: bool,
    },

    /// Run headless random-vs-random matches and aggregate statistics
    Simulate {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Board size (default: 5)
        #[arg(short = 'n', long, default_value = "5")]
        size: usize,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Rounds after which a game counts as undecided (default: 500)
        #[arg(short = 'r', long, default_value = "500")]
        max_rounds: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

/// Log to stderr so prompts on stdout stay readable. `RUST_LOG` overrides
/// the default level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.command {
        Commands::Play {
            size,
            load,
            seed,
            save_path,
            export_path,
            config,
            no_color,
        } => cli::play::execute(&cli::play::PlayOptions {
            size,
            load,
            seed,
            save_path,
            export_path,
            config,
            color: !no_color,
        }),

        Commands::Simulate {
            games,
            size,
            seed,
            threads,
            max_rounds,
            format,
            progress,
        } => cli::simulate::execute(games, size, seed, threads, max_rounds, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
