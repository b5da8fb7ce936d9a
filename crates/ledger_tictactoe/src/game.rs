//! The per-game record held by the registry.

use crate::invariants::{GameInvariants, InvariantSet};
use crate::{Board, Cell, GameId, Identity, Mark, Position, RegistryError, TurnMarks};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Created, waiting for an opponent.
    Open,
    /// Both sides seated, moves accepted.
    Active,
    /// Won or drawn. Terminal.
    Finished,
}

/// One game: seats, board, counters and outcome.
///
/// Fields are only mutated by the registry, after every precondition of
/// the operation has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    player: Identity,
    opponent: Option<Identity>,
    board: Board,
    moves_left: u8,
    turn_marks: TurnMarks,
    is_finished: bool,
    winner: Option<Identity>,
}

/// Raw fields of a stored game, used to rebuild a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParts {
    /// Game id.
    pub id: GameId,
    /// Creator (X).
    pub player: Identity,
    /// Acceptor (O), if any.
    pub opponent: Option<Identity>,
    /// Board contents.
    pub board: Board,
    /// Moves remaining.
    pub moves_left: u8,
    /// Last turn marks of both sides.
    pub turn_marks: TurnMarks,
    /// Finished flag.
    pub is_finished: bool,
    /// Winner, if any.
    pub winner: Option<Identity>,
}

impl Game {
    /// Creates an open game with an empty board.
    #[instrument]
    pub(crate) fn open(id: GameId, player: Identity, turn_mark: u64) -> Self {
        Self {
            id,
            player,
            opponent: None,
            board: Board::new(),
            moves_left: 9,
            turn_marks: TurnMarks::new(turn_mark, 0),
            is_finished: false,
            winner: None,
        }
    }

    /// Rebuilds a game from stored parts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvariantViolation`] when the parts do not
    /// describe a reachable game state.
    #[instrument(skip(parts), fields(game_id = parts.id))]
    pub fn from_parts(parts: GameParts) -> Result<Self, RegistryError> {
        let game = Self {
            id: parts.id,
            player: parts.player,
            opponent: parts.opponent,
            board: parts.board,
            moves_left: parts.moves_left,
            turn_marks: parts.turn_marks,
            is_finished: parts.is_finished,
            winner: parts.winner,
        };

        GameInvariants::check_all(&game).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            RegistryError::InvariantViolation(format!("Game {}: {}", game.id, descriptions))
        })?;

        debug!("Game restored from parts");
        Ok(game)
    }

    /// Game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Creator, playing X.
    pub fn player(&self) -> &Identity {
        &self.player
    }

    /// Acceptor, playing O, once the game has been accepted.
    pub fn opponent(&self) -> Option<&Identity> {
        self.opponent.as_ref()
    }

    /// Board contents.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves remaining before the board is full.
    pub fn moves_left(&self) -> u8 {
        self.moves_left
    }

    /// Last turn marks recorded for both sides.
    pub fn turn_marks(&self) -> TurnMarks {
        self.turn_marks
    }

    /// Whether the game has ended.
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Winner of a finished game; `None` while running or after a draw.
    pub fn winner(&self) -> Option<&Identity> {
        self.winner.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.is_finished {
            Phase::Finished
        } else if self.opponent.is_some() {
            Phase::Active
        } else {
            Phase::Open
        }
    }

    /// Index of the next ply (0-8).
    pub fn ply(&self) -> u8 {
        9 - self.moves_left
    }

    /// Mark due on the next ply.
    pub fn mark_to_move(&self) -> Mark {
        Mark::for_ply(self.ply())
    }

    /// Mark played by `identity`, if seated.
    pub fn mark_of(&self, identity: &Identity) -> Option<Mark> {
        if *identity == self.player {
            Some(Mark::X)
        } else if self.opponent.as_ref() == Some(identity) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Identity seated for `mark`.
    pub fn seat(&self, mark: Mark) -> Option<&Identity> {
        match mark {
            Mark::X => Some(&self.player),
            Mark::O => self.opponent.as_ref(),
        }
    }

    pub(crate) fn seat_opponent(&mut self, opponent: Identity, turn_mark: u64) {
        self.opponent = Some(opponent);
        self.turn_marks.record(Mark::O, turn_mark);
    }

    pub(crate) fn place(&mut self, pos: Position, mark: Mark, turn_mark: u64) {
        self.board.set(pos, Cell::Occupied(mark));
        self.moves_left -= 1;
        self.turn_marks.record(mark, turn_mark);
    }

    pub(crate) fn finish(&mut self, winner: Option<Identity>) {
        self.is_finished = true;
        self.winner = winner;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
