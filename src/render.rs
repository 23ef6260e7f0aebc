//! Text renderer for the board with optional ANSI colors.

use crate::game::{Cell, GameState, Resources, Side};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

/// Marker printed for empty cells.
const EMPTY_MARKER: char = 'X';

const fn side_color(side: Side) -> &'static str {
    match side {
        Side::Player => BLUE,
        Side::Agent => RED,
    }
}

fn cell_text(cell: Cell) -> String {
    match cell {
        Cell::Empty => EMPTY_MARKER.to_string(),
        Cell::Unclaimed(cost) => cost.to_string(),
        Cell::Owned(side) => side.symbol().to_string(),
    }
}

/// Render the board as a grid with column indices across the top and row
/// indices down the left.
///
/// Output format for a fresh 3×3 board:
/// ```text
///    0 1 2
/// 0 |A 2 2
/// 1 |2 2 2
/// 2 |2 2 P
/// ```
#[must_use]
pub fn render_board(state: &GameState, color: bool) -> String {
    let board = &state.board;
    let size = board.size();

    let widest_cell = board
        .cells()
        .iter()
        .map(|&cell| cell_text(cell).len())
        .max()
        .unwrap_or(1);
    let width = widest_cell.max(size.saturating_sub(1).to_string().len());
    let label = size.saturating_sub(1).to_string().len();

    let mut out = String::new();
    out.push_str(&format!("{:label$}  ", ""));
    let header: Vec<_> = (0..size).map(|y| format!("{y:>width$}")).collect();
    out.push_str(&format!("{}\n", header.join(" ")));

    for x in 0..size {
        out.push_str(&format!("{x:>label$} |"));
        let row: Vec<_> = board
            .row(x)
            .map(|cell| {
                let text = format!("{:>width$}", cell_text(cell));
                match (color, cell) {
                    (true, Cell::Owned(side)) => {
                        format!("{BOLD}{}{text}{RESET}", side_color(side))
                    }
                    (true, Cell::Empty) => format!("{GRAY}{text}{RESET}"),
                    _ => text,
                }
            })
            .collect();
        out.push_str(&format!("{}\n", row.join(" ")));
    }

    out
}

/// Render one side's counters on a single line.
#[must_use]
pub fn render_resources(side: Side, resources: Resources, territories: u32) -> String {
    format!(
        "{side}: rice={}, water={}, farmers={}, territories={territories}",
        resources.rice, resources.water, resources.farmers
    )
}

/// Render the board followed by both sides' counters.
#[must_use]
pub fn render_state(state: &GameState, color: bool) -> String {
    let mut out = render_board(state, color);
    for side in Side::ALL {
        out.push_str(&render_resources(
            side,
            state.resources[side],
            state.territories[side],
        ));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Coord;

    #[test]
    fn test_render_fresh_board() {
        let state = GameState::new(3).unwrap();
        let text = render_board(&state, false);
        assert_eq!(text, "   0 1 2\n0 |A 2 2\n1 |2 2 2\n2 |2 2 P\n");
    }

    #[test]
    fn test_render_empty_marker() {
        let mut state = GameState::new(2).unwrap();
        state.board.set(Coord::new(0, 1), Cell::Empty);
        let text = render_board(&state, false);
        assert!(text.contains("0 |A X"));
    }

    #[test]
    fn test_render_wide_board_aligns() {
        let state = GameState::new(11).unwrap();
        let text = render_board(&state, false);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].ends_with("10"));
        assert!(lines[1].starts_with(" 0 | A"));
        assert!(lines[11].ends_with(" P"));
    }

    #[test]
    fn test_render_color_wraps_owned() {
        let state = GameState::new(2).unwrap();
        let text = render_board(&state, true);
        assert!(text.contains(RESET));
        assert!(text.contains(BLUE));
    }

    #[test]
    fn test_render_resources_line() {
        let line = render_resources(Side::Player, Resources::new(1, 2, 3), 4);
        assert_eq!(line, "player: rice=1, water=2, farmers=3, territories=4");
    }
}
