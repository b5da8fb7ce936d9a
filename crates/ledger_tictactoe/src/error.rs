//! Error types for the game registry and its storage substrate.

use crate::{GameId, Identity, Mark, Position};
use derive_more::{Display, Error};
use tracing::instrument;

/// Rejection of a registry operation.
///
/// Every variant leaves the targeted game untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RegistryError {
    /// No game has been allocated under this id.
    #[display("Game {} not found", _0)]
    GameNotFound(GameId),

    /// The creator tried to accept their own game.
    #[display("{} cannot accept their own game", _0)]
    InvalidOpponent(Identity),

    /// The game already has an opponent.
    #[display("Game {} has already been accepted", _0)]
    AlreadyAccepted(GameId),

    /// Row or column outside 0-2.
    #[display("Cell ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: u8,
        /// Requested column.
        col: u8,
    },

    /// The caller is neither the player nor the opponent.
    #[display("{} is not seated in game {}", caller, game_id)]
    UnauthorizedCaller {
        /// Game the caller tried to move in.
        game_id: GameId,
        /// The unseated caller.
        caller: Identity,
    },

    /// The caller's mark does not match the current ply.
    #[display("It's not {}'s turn; {} is to move", caller, expected)]
    WrongTurn {
        /// Seated caller who moved out of order.
        caller: Identity,
        /// Mark due on the current ply.
        expected: Mark,
    },

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game has a winner or ended in a draw.
    #[display("Game {} is already finished", _0)]
    GameFinished(GameId),

    /// The game has not been accepted yet.
    #[display("Game {} has no opponent yet", _0)]
    OpponentNotSet(GameId),

    /// The supplied turn mark is behind the caller's last recorded one.
    #[display("Turn mark {} is behind the last recorded mark {}", given, last)]
    TurnMarkRegressed {
        /// Turn mark supplied with the move.
        given: u64,
        /// Last turn mark recorded for the caller's side.
        last: u64,
    },

    /// A game record failed its consistency checks.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The storage substrate failed.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for RegistryError {}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Storage substrate error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
