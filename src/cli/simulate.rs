//! Simulate command implementation.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use paddy::simulate::{run_match, MatchConfig};
use paddy::Board;
use rayon::prelude::*;

use super::output::{
    format_simulation_csv, format_simulation_text, JsonSimulationResult, SimulationStats,
};
use super::{CliError, SimulateFormat};

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the board size is invalid or output fails.
pub(crate) fn execute(
    games: u64,
    size: usize,
    seed: Option<u64>,
    threads: Option<usize>,
    max_rounds: u32,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Reject a bad size once instead of failing every match
    Board::new(size)?;

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(rand::random);
    let config = MatchConfig {
        board_size: size,
        max_rounds,
    };

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SimulationStats::default, |mut local, i| {
            match run_match(base_seed.wrapping_add(i), &config) {
                Ok(result) => local.add_result(&result),
                Err(_) => local.add_error(),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SimulationStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats, size));
            println!();
            #[allow(clippy::cast_precision_loss)]
            let games_per_sec = if duration.as_secs_f64() > 0.0 {
                stats.games_played as f64 / duration.as_secs_f64()
            } else {
                0.0
            };
            println!(
                "Seed: {base_seed}  Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        SimulateFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(&stats, size);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SimulateFormat::Csv => {
            print!("{}", format_simulation_csv(&stats));
        }
    }

    Ok(())
}
