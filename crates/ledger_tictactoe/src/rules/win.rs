//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Mark, Position};
use tracing::instrument;

/// The 8 winning lines: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Lines passing through `pos`: its row, its column and any diagonal it sits on.
pub fn lines_through(pos: Position) -> impl Iterator<Item = &'static [Position; 3]> {
    let row = usize::from(pos.row());
    let col = usize::from(pos.col());
    LINES
        .iter()
        .enumerate()
        .filter(move |(idx, _)| match idx {
            0..=2 => *idx == row,
            3..=5 => *idx - 3 == col,
            6 => pos.on_main_diagonal(),
            _ => pos.on_anti_diagonal(),
        })
        .map(|(_, line)| line)
}

/// Checks whether `mark` at `pos` sits on a completed line.
///
/// Only the lines through the moved cell are inspected.
#[instrument(skip(board))]
pub fn completes_line(board: &Board, pos: Position, mark: Mark) -> bool {
    lines_through(pos).any(|line| {
        line.iter()
            .all(|&cell| board.get(cell) == Cell::Occupied(mark))
    })
}

/// Checks whether `mark` owns any completed line on the board.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|line| {
        line.iter()
            .all(|&cell| board.get(cell) == Cell::Occupied(mark))
    })
}

/// Returns the mark holding a completed line, scanning all 8 lines.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        let cell = board.get(a);
        if cell != Cell::Empty && cell == board.get(b) && cell == board.get(c) {
            return cell.mark();
        }
    }

    None
}
