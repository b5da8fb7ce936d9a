//! First-class action types for ledger tic-tac-toe.
//!
//! Actions carry everything the host supplies for a call (who is calling,
//! what they want, and the external turn mark) so they can be validated
//! against a game before anything is written.

use crate::{Identity, Position};
use serde::{Deserialize, Serialize};

/// A request to place the caller's mark at `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Side asking to move.
    pub caller: Identity,
    /// Requested row (valid range 0-2).
    pub row: u8,
    /// Requested column (valid range 0-2).
    pub col: u8,
    /// External time index of the call.
    pub turn_mark: u64,
}

impl Move {
    /// Board position of the move, `None` when off the board.
    pub fn position(&self) -> Option<Position> {
        Position::from_row_col(self.row, self.col)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> ({}, {})", self.caller, self.row, self.col)
    }
}

/// A request to join an open game as the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Accept {
    /// Identity asking to be seated as O.
    pub acceptor: Identity,
    /// External time index of the call.
    pub turn_mark: u64,
}
