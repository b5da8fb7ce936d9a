//! Row model and conversions to and from [`Game`].

use derive_getters::Getters;
use diesel::prelude::*;
use ledger_tictactoe::{Board, Game, GameParts, Identity, TurnMarks};
use tracing::instrument;

use crate::db::{DbError, schema};

/// One stored game.
///
/// The board is kept in its compact nine-character form (`-`, `X`, `O`,
/// row-major). Turn marks and the id are stored as signed 64-bit integers.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset, Getters)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GameRow {
    id: i64,
    player: String,
    opponent: Option<String>,
    board: String,
    moves_left: i32,
    player_turn_mark: i64,
    opponent_turn_mark: i64,
    is_finished: bool,
    winner: Option<String>,
}

fn to_signed(value: u64, column: &str) -> Result<i64, DbError> {
    i64::try_from(value).map_err(|_| DbError::malformed(column, format!("{} does not fit a BIGINT", value)))
}

fn to_unsigned(value: i64, column: &str) -> Result<u64, DbError> {
    u64::try_from(value).map_err(|_| DbError::malformed(column, format!("negative value {}", value)))
}

fn identity(raw: &str, column: &str) -> Result<Identity, DbError> {
    Identity::new(raw).map_err(|e| DbError::malformed(column, format!("'{}': {}", raw, e)))
}

impl TryFrom<&Game> for GameRow {
    type Error = DbError;

    #[instrument(skip(game), fields(game_id = game.id()))]
    fn try_from(game: &Game) -> Result<Self, Self::Error> {
        Ok(Self {
            id: to_signed(game.id(), "id")?,
            player: game.player().to_string(),
            opponent: game.opponent().map(ToString::to_string),
            board: game.board().to_compact(),
            moves_left: i32::from(game.moves_left()),
            player_turn_mark: to_signed(game.turn_marks().player(), "player_turn_mark")?,
            opponent_turn_mark: to_signed(game.turn_marks().opponent(), "opponent_turn_mark")?,
            is_finished: game.is_finished(),
            winner: game.winner().map(ToString::to_string),
        })
    }
}

impl TryFrom<GameRow> for Game {
    type Error = DbError;

    /// Rebuilds the game. Rows describing an unreachable state are rejected.
    #[instrument(skip(row), fields(game_id = row.id))]
    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let board: Board = row
            .board
            .parse()
            .map_err(|e| DbError::malformed("board", format!("'{}': {}", row.board, e)))?;
        let moves_left = u8::try_from(row.moves_left)
            .map_err(|_| DbError::malformed("moves_left", row.moves_left))?;

        let parts = GameParts {
            id: to_unsigned(row.id, "id")?,
            player: identity(&row.player, "player")?,
            opponent: row
                .opponent
                .as_deref()
                .map(|raw| identity(raw, "opponent"))
                .transpose()?,
            board,
            moves_left,
            turn_marks: TurnMarks::new(
                to_unsigned(row.player_turn_mark, "player_turn_mark")?,
                to_unsigned(row.opponent_turn_mark, "opponent_turn_mark")?,
            ),
            is_finished: row.is_finished,
            winner: row
                .winner
                .as_deref()
                .map(|raw| identity(raw, "winner"))
                .transpose()?,
        };

        Game::from_parts(parts).map_err(|e| DbError::malformed("game", e))
    }
}
