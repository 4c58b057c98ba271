//! Formatting utilities for terminal output

use crate::core::{Board, Coord, TileState, row_letter};

/// Label shown on a hidden tile
pub const HIDDEN_LABEL: &str = "---";

/// Width of one board cell, wide enough for the longest value
#[must_use]
pub fn cell_width(board: &Board) -> usize {
    board
        .widest_value()
        .max(HIDDEN_LABEL.len())
        .max(board.cols().to_string().len())
}

/// Label printed at the start of a row, `A` for row 0
#[must_use]
pub fn row_label(row: usize) -> String {
    row_letter(row).map_or_else(|| row.to_string(), String::from)
}

/// Text shown for a tile in the given state
#[must_use]
pub fn tile_text(value: &str, state: TileState) -> &str {
    if state.is_face_up() { value } else { HIDDEN_LABEL }
}

/// Column header with 1-based column numbers
#[must_use]
pub fn board_header(cols: usize, width: usize) -> String {
    let numbers: Vec<String> = (1..=cols).map(|c| format!("{c:^width$}")).collect();
    format!("   {}", numbers.join(" "))
}

/// Board as plain text lines, header first
///
/// Each row starts with its letter so players can type the labels they see.
#[must_use]
pub fn board_lines(board: &Board) -> Vec<String> {
    let width = cell_width(board);
    let mut lines = Vec::with_capacity(board.rows() + 1);
    lines.push(board_header(board.cols(), width));

    for row in 0..board.rows() {
        let cells: Vec<String> = (0..board.cols())
            .map(|col| {
                let coord = Coord::new(row, col);
                let text = match (board.value_at(coord), board.state_at(coord)) {
                    (Ok(value), Ok(state)) => tile_text(value, state),
                    _ => HIDDEN_LABEL,
                };
                format!("{text:^width$}")
            })
            .collect();
        lines.push(format!("{:>2} {}", row_label(row), cells.join(" ")));
    }

    lines
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Matched pairs as a bar
#[must_use]
pub fn pairs_bar(matched: usize, total: usize, width: usize) -> String {
    create_progress_bar(matched as f64, total as f64, width)
}
