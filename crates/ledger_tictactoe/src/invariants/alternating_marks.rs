//! Alternating marks invariant: X moves first, then sides alternate.

use super::Invariant;
use crate::{Game, Mark};

/// Invariant: the board holds as many X as O marks, or one more X.
///
/// X moves on even plies and O on odd plies, so any other balance means a
/// side moved out of turn.
pub struct AlternatingMarksInvariant;

impl Invariant<Game> for AlternatingMarksInvariant {
    fn holds(game: &Game) -> bool {
        let x_count = game.board().count(Mark::X);
        let o_count = game.board().count(Mark::O);

        x_count == o_count || x_count == o_count + 1
    }

    fn description() -> &'static str {
        "Marks alternate (X, O, X, O, ...)"
    }
}
