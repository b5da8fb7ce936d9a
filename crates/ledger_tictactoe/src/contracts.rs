//! Contract-based validation for registry transitions.
//!
//! Preconditions run in a fixed order and the first failure is the error
//! reported. Postconditions are only checked in debug builds.

use crate::action::{Accept, Move};
use crate::invariants::{GameInvariants, InvariantSet};
use crate::{Cell, Game, RegistryError};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), RegistryError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), RegistryError>;
}

fn violations_to_error(
    violations: Vec<crate::invariants::InvariantViolation>,
) -> RegistryError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    RegistryError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not finished.
pub struct GameInPlay;

impl GameInPlay {
    /// Fails with [`RegistryError::GameFinished`].
    pub fn check(game: &Game) -> Result<(), RegistryError> {
        if game.is_finished() {
            Err(RegistryError::GameFinished(game.id()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: row and column are on the board.
pub struct WithinBoard;

impl WithinBoard {
    /// Fails with [`RegistryError::OutOfBounds`].
    pub fn check(mov: &Move) -> Result<(), RegistryError> {
        match mov.position() {
            Some(_) => Ok(()),
            None => Err(RegistryError::OutOfBounds {
                row: mov.row,
                col: mov.col,
            }),
        }
    }
}

/// Precondition: an opponent has accepted the game.
pub struct OpponentSeated;

impl OpponentSeated {
    /// Fails with [`RegistryError::OpponentNotSet`].
    pub fn check(game: &Game) -> Result<(), RegistryError> {
        if game.opponent().is_none() {
            Err(RegistryError::OpponentNotSet(game.id()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the caller is the player or the opponent.
pub struct CallerSeated;

impl CallerSeated {
    /// Fails with [`RegistryError::UnauthorizedCaller`].
    pub fn check(mov: &Move, game: &Game) -> Result<(), RegistryError> {
        if game.mark_of(&mov.caller).is_none() {
            Err(RegistryError::UnauthorizedCaller {
                game_id: game.id(),
                caller: mov.caller.clone(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the caller's mark is the one due on this ply.
pub struct CallersTurn;

impl CallersTurn {
    /// Fails with [`RegistryError::WrongTurn`].
    pub fn check(mov: &Move, game: &Game) -> Result<(), RegistryError> {
        let expected = game.mark_to_move();
        if game.mark_of(&mov.caller) != Some(expected) {
            Err(RegistryError::WrongTurn {
                caller: mov.caller.clone(),
                expected,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`RegistryError::CellOccupied`].
    pub fn check(mov: &Move, game: &Game) -> Result<(), RegistryError> {
        match mov.position() {
            Some(pos) if !game.board().is_empty(pos) => Err(RegistryError::CellOccupied(pos)),
            Some(_) => Ok(()),
            None => Err(RegistryError::OutOfBounds {
                row: mov.row,
                col: mov.col,
            }),
        }
    }
}

/// Precondition: the turn mark does not go back in time for the caller's side.
pub struct TurnMarkAdvances;

impl TurnMarkAdvances {
    /// Fails with [`RegistryError::TurnMarkRegressed`].
    pub fn check(mov: &Move, game: &Game) -> Result<(), RegistryError> {
        let last = game.turn_marks().for_mark(game.mark_to_move());
        if mov.turn_mark < last {
            Err(RegistryError::TurnMarkRegressed {
                given: mov.turn_mark,
                last,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a move, in reporting order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all move preconditions.
    #[instrument(skip(game), fields(game_id = game.id()))]
    pub fn check(mov: &Move, game: &Game) -> Result<(), RegistryError> {
        GameInPlay::check(game)?;
        WithinBoard::check(mov)?;
        OpponentSeated::check(game)?;
        CallerSeated::check(mov, game)?;
        CallersTurn::check(mov, game)?;
        CellIsEmpty::check(mov, game)?;
        TurnMarkAdvances::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - exactly one cell went from empty to occupied, no other cell changed
/// - all game invariants hold
pub struct MoveContract;

impl Contract<Game, Move> for MoveContract {
    fn pre(game: &Game, action: &Move) -> Result<(), RegistryError> {
        LegalMove::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), RegistryError> {
        let mut placed = 0;
        for (was, now) in before.board().cells().iter().zip(after.board().cells()) {
            match (was, now) {
                (Cell::Empty, Cell::Occupied(_)) => placed += 1,
                (was, now) if was != now => {
                    warn!(?was, ?now, "Occupied cell changed");
                    return Err(RegistryError::InvariantViolation(
                        "Postcondition failed: occupied cell changed".to_string(),
                    ));
                }
                _ => {}
            }
        }
        if placed != 1 {
            warn!(placed, "Move did not place exactly one mark");
            return Err(RegistryError::InvariantViolation(format!(
                "Postcondition failed: {} cells placed",
                placed
            )));
        }

        GameInvariants::check_all(after).map_err(violations_to_error)
    }
}

// ─────────────────────────────────────────────────────────────
//  Accept Contract
// ─────────────────────────────────────────────────────────────

/// Contract for accept actions.
///
/// Preconditions: no opponent yet, acceptor differs from the player.
pub struct AcceptContract;

impl Contract<Game, Accept> for AcceptContract {
    fn pre(game: &Game, action: &Accept) -> Result<(), RegistryError> {
        if game.opponent().is_some() {
            return Err(RegistryError::AlreadyAccepted(game.id()));
        }
        if action.acceptor == *game.player() {
            return Err(RegistryError::InvalidOpponent(action.acceptor.clone()));
        }
        Ok(())
    }

    fn post(before: &Game, after: &Game) -> Result<(), RegistryError> {
        if before.board() != after.board() || after.opponent().is_none() {
            return Err(RegistryError::InvariantViolation(
                "Postcondition failed: accept must only seat the opponent".to_string(),
            ));
        }
        GameInvariants::check_all(after).map_err(violations_to_error)
    }
}
