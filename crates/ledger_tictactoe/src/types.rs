//! Core domain types for ledger tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sequential identifier of a game in the registry.
pub type GameId = u64;

/// Mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Placed by the creator (moves on even plies).
    X,
    /// Placed by the acceptor (moves on odd plies).
    O,
}

impl Mark {
    /// Returns the mark that moves on the given ply (0-indexed).
    pub fn for_ply(ply: u8) -> Self {
        if ply % 2 == 0 { Mark::X } else { Mark::O }
    }

    /// Single-character form used in compact board encodings.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Error parsing a compact board string.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The string does not hold exactly nine cells.
    #[display("Board must have 9 cells, got {}", _0)]
    WrongLength(#[error(not(source))] usize),
    /// A character is not one of `-`, `X`, `O`.
    #[display("Invalid cell character {:?}", _0)]
    InvalidCell(#[error(not(source))] char),
}

/// 3x3 board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if the cell at the given position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Iterates `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::ALL.iter().map(|&pos| (pos, self.get(pos)))
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Number of cells holding the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Encodes the board as nine characters (`-`, `X`, `O`).
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.mark().map_or('-', Mark::symbol))
            .collect()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses the nine-character form produced by [`Board::to_compact`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(BoardParseError::WrongLength(chars.len()));
        }
        let mut board = Board::new();
        for (cell, ch) in board.cells.iter_mut().zip(chars) {
            *cell = match ch {
                '-' => Cell::Empty,
                'X' => Cell::Occupied(Mark::X),
                'O' => Cell::Occupied(Mark::O),
                other => return Err(BoardParseError::InvalidCell(other)),
            };
        }
        Ok(board)
    }
}

/// Error building an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Identity must not be empty")]
pub struct IdentityError;

/// Opaque caller identity supplied by the host.
///
/// Normalised on construction (trimmed, ASCII-lowercased), so equality and
/// `Display` both work on the canonical lowercase text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Creates a normalised identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the text is empty after trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentityError> {
        let canonical = raw.as_ref().trim().to_ascii_lowercase();
        if canonical.is_empty() {
            return Err(IdentityError);
        }
        Ok(Self(canonical))
    }

    /// Canonical lowercase text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

/// External time index at which each side last acted.
///
/// Maintained for stall detection by collaborators outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new)]
pub struct TurnMarks {
    player: u64,
    opponent: u64,
}

impl TurnMarks {
    /// Last turn mark recorded for the creator.
    pub fn player(&self) -> u64 {
        self.player
    }

    /// Last turn mark recorded for the acceptor.
    pub fn opponent(&self) -> u64 {
        self.opponent
    }

    /// Last turn mark recorded for the side playing `mark`.
    pub fn for_mark(&self, mark: Mark) -> u64 {
        match mark {
            Mark::X => self.player,
            Mark::O => self.opponent,
        }
    }

    /// Records a new turn mark for the side playing `mark`.
    pub(crate) fn record(&mut self, mark: Mark, turn_mark: u64) {
        match mark {
            Mark::X => self.player = turn_mark,
            Mark::O => self.opponent = turn_mark,
        }
    }
}
