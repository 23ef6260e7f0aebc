//! Output formatting for the `simulate` command.

#![allow(clippy::cast_precision_loss)]

use paddy::game::{Outcome, PerSide, Side};
use paddy::simulate::MatchResult;
use serde::Serialize;

/// Aggregated results of many headless matches.
#[derive(Debug, Default, Clone)]
pub(super) struct SimulationStats {
    /// Total matches played.
    pub(super) games_played: u64,
    /// Wins per side.
    pub(super) wins: PerSide<u64>,
    /// Matches that hit the round limit.
    pub(super) undecided: u64,
    /// Matches that could not be set up.
    pub(super) errors: u64,
    /// Rounds across all matches.
    total_rounds: u64,
    /// Final territories per side across all matches.
    total_territories: PerSide<u64>,
}

impl SimulationStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds);
        for (side, &held) in &result.territories {
            self.total_territories[side] += u64::from(held);
        }
        match result.outcome.winner() {
            Some(side) => self.wins[side] += 1,
            None => self.undecided += 1,
        }
    }

    /// Count a match that failed to start.
    pub(super) fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &SimulationStats) {
        self.games_played += other.games_played;
        self.undecided += other.undecided;
        self.errors += other.errors;
        self.total_rounds += other.total_rounds;
        for side in Side::ALL {
            self.wins[side] += other.wins[side];
            self.total_territories[side] += other.total_territories[side];
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Win rate for a side (0.0-1.0).
    pub(super) fn win_rate(&self, side: Side) -> f64 {
        self.per_game(self.wins[side])
    }

    /// Share of matches that hit the round limit (0.0-1.0).
    pub(super) fn undecided_rate(&self) -> f64 {
        self.per_game(self.undecided)
    }

    /// Average match length in rounds.
    pub(super) fn avg_rounds(&self) -> f64 {
        self.per_game(self.total_rounds)
    }

    /// Average final territory of a side.
    pub(super) fn avg_territories(&self, side: Side) -> f64 {
        self.per_game(self.total_territories[side])
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    games_played: u64,
    board_size: usize,
    sides: Vec<JsonSideResult>,
    undecided: u64,
    errors: u64,
    avg_rounds: f64,
}

/// JSON-serializable per-side stats.
#[derive(Debug, Serialize)]
struct JsonSideResult {
    side: String,
    wins: u64,
    win_rate: f64,
    avg_territories: f64,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats, board_size: usize) -> Self {
        let sides = Side::ALL
            .into_iter()
            .map(|side| JsonSideResult {
                side: side.to_string(),
                wins: stats.wins[side],
                win_rate: stats.win_rate(side),
                avg_territories: stats.avg_territories(side),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            board_size,
            sides,
            undecided: stats.undecided,
            errors: stats.errors,
            avg_rounds: stats.avg_rounds(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats, board_size: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation Results ({} games, {board_size}x{board_size} board)\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for side in Side::ALL {
        output.push_str(&format!(
            "  {side}: {:.1}% ({} wins, avg {:.1} territories)\n",
            stats.win_rate(side) * 100.0,
            stats.wins[side],
            stats.avg_territories(side)
        ));
    }
    output.push_str(&format!(
        "  Undecided: {} ({:.1}%)\n",
        stats.undecided,
        stats.undecided_rate() * 100.0
    ));
    if stats.errors > 0 {
        output.push_str(&format!("  Failed to start: {}\n", stats.errors));
    }

    output.push_str(&format!(
        "\nAverage Game Length: {:.1} rounds\n",
        stats.avg_rounds()
    ));

    output
}

/// Format simulation stats as CSV.
pub(super) fn format_simulation_csv(stats: &SimulationStats) -> String {
    let mut output = String::from("outcome,count,rate\n");

    let rows = [
        (Outcome::PlayerWin, stats.wins[Side::Player]),
        (Outcome::AiWin, stats.wins[Side::Agent]),
        (Outcome::Continue, stats.undecided),
    ];
    for (outcome, count) in rows {
        let label = match outcome {
            Outcome::PlayerWin => "player_win",
            Outcome::AiWin => "agent_win",
            Outcome::Continue => "undecided",
        };
        output.push_str(&format!("{label},{count},{:.4}\n", stats.per_game(count)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: Outcome, rounds: u32) -> MatchResult {
        MatchResult {
            seed: 0,
            outcome,
            rounds,
            territories: PerSide::new(6, 4),
            failed_actions: 0,
        }
    }

    #[test]
    fn test_stats_accumulate_and_merge() {
        let mut a = SimulationStats::default();
        a.add_result(&result(Outcome::PlayerWin, 10));
        a.add_result(&result(Outcome::Continue, 30));

        let mut b = SimulationStats::default();
        b.add_result(&result(Outcome::AiWin, 20));
        b.add_error();

        a.merge(&b);
        assert_eq!(a.games_played, 3);
        assert_eq!(a.wins, PerSide::new(1, 1));
        assert_eq!(a.undecided, 1);
        assert_eq!(a.errors, 1);
        assert!((a.avg_rounds() - 20.0).abs() < 1e-9);
        assert!((a.avg_territories(Side::Player) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = SimulationStats::default();
        assert!(stats.win_rate(Side::Agent).abs() < 1e-9);
        assert!(stats.avg_rounds().abs() < 1e-9);
    }

    #[test]
    fn test_csv_rows() {
        let mut stats = SimulationStats::default();
        stats.add_result(&result(Outcome::PlayerWin, 5));
        stats.add_result(&result(Outcome::PlayerWin, 5));
        let csv = format_simulation_csv(&stats);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "outcome,count,rate");
        assert_eq!(lines[1], "player_win,2,1.0000");
        assert_eq!(lines[3], "undecided,0,0.0000");
    }

    #[test]
    fn test_text_mentions_sides() {
        let mut stats = SimulationStats::default();
        stats.add_result(&result(Outcome::AiWin, 12));
        let text = format_simulation_text(&stats, 5);
        assert!(text.contains("5x5 board"));
        assert!(text.contains("agent: 100.0% (1 wins"));
    }
}
