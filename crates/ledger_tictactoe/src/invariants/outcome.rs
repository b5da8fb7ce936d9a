//! Outcome invariant: seats, finished flag and winner agree with the board.

use super::Invariant;
use crate::{Game, rules};

/// Invariant: the recorded outcome is the one the board shows.
///
/// - an open game has an empty board;
/// - the opponent is never the player;
/// - a winner owns a completed line and the game is finished;
/// - a finished game without winner is a full board with no line;
/// - a running game has no line and at least one empty cell.
pub struct OutcomeInvariant;

impl Invariant<Game> for OutcomeInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();

        let Some(opponent) = game.opponent() else {
            return board.occupied() == 0 && !game.is_finished();
        };
        if opponent == game.player() {
            return false;
        }

        match (game.is_finished(), game.winner()) {
            (true, Some(winner)) => game
                .mark_of(winner)
                .is_some_and(|mark| rules::has_line(board, mark)),
            (true, None) => rules::is_draw(board),
            (false, Some(_)) => false,
            (false, None) => rules::check_winner(board).is_none() && !rules::is_full(board),
        }
    }

    fn description() -> &'static str {
        "Finished flag and winner match the board"
    }
}
