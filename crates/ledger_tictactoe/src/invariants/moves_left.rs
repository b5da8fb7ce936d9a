//! Moves-left invariant: the counter mirrors the board.

use super::Invariant;
use crate::Game;

/// Invariant: `moves_left = 9 - occupied cells`.
pub struct MovesLeftInvariant;

impl Invariant<Game> for MovesLeftInvariant {
    fn holds(game: &Game) -> bool {
        usize::from(game.moves_left()) + game.board().occupied() == 9
    }

    fn description() -> &'static str {
        "Moves left equals the number of empty cells"
    }
}
