//! Notifications produced by registry transitions.
//!
//! The registry never publishes anything itself: each successful call
//! returns the events it produced and the host decides where they go.

use crate::{GameId, Identity};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Event emitted by a successful registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game was opened.
    #[display("Game {} created by {}", game_id, creator)]
    GameCreated {
        /// Newly allocated id.
        game_id: GameId,
        /// Creator, who plays X.
        creator: Identity,
    },

    /// An opponent joined an open game.
    #[display("Game {} accepted by {} against {}", game_id, acceptor, creator)]
    GameAccepted {
        /// Accepted game.
        game_id: GameId,
        /// Acceptor, who plays O.
        acceptor: Identity,
        /// Creator of the game.
        creator: Identity,
    },

    /// A mark was placed.
    #[display("Game {}: {} played ({}, {})", game_id, mover, row, col)]
    MovePlayed {
        /// Game the move was played in.
        game_id: GameId,
        /// Side that moved.
        mover: Identity,
        /// Row of the move.
        row: u8,
        /// Column of the move.
        col: u8,
    },

    /// The last move completed a line.
    #[display("Game {} won by {} at ({}, {})", game_id, winner, row, col)]
    GameWon {
        /// Finished game.
        game_id: GameId,
        /// Side that completed the line.
        winner: Identity,
        /// Row of the winning move.
        row: u8,
        /// Column of the winning move.
        col: u8,
    },

    /// The ninth move filled the board without a line.
    #[display("Game {} ended in a draw", game_id)]
    GameDrawn {
        /// Finished game.
        game_id: GameId,
    },
}

impl GameEvent {
    /// Id of the game this event belongs to.
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameCreated { game_id, .. }
            | GameEvent::GameAccepted { game_id, .. }
            | GameEvent::MovePlayed { game_id, .. }
            | GameEvent::GameWon { game_id, .. }
            | GameEvent::GameDrawn { game_id } => *game_id,
        }
    }
}
