//! Database repository backing the game registry.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ledger_tictactoe::{ApplyFn, Game, GameEvent, GameId, GameStore, RegistryError, StoreError};
use tracing::{debug, info, instrument};

use crate::db::schema::games;
use crate::db::{DbError, DbErrorKind, GameRow};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits for a competing transaction before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// SQLite-backed game store.
///
/// Every mutation runs in an `IMMEDIATE` transaction, which takes the
/// database write lock up front. Id allocation and read-modify-write of a
/// game are therefore serialized across processes sharing the file.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

/// Failure inside an update transaction: either the registry rejected the
/// action or the database failed. Both roll the transaction back.
#[derive(Debug)]
enum TxError {
    Registry(RegistryError),
    Db(DbError),
}

impl From<RegistryError> for TxError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<DbError> for TxError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

impl From<diesel::result::Error> for TxError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}

impl From<TxError> for RegistryError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Registry(e) => e,
            TxError::Db(e) => RegistryError::Store(e.into()),
        }
    }
}

impl GameRepository {
    /// Creates a repository for the database file at `db_path`.
    ///
    /// The file is created on first connection. Call [`Self::migrate`]
    /// before use.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(DbErrorKind::InvalidPath, "database path must not be empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Database file path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(DbErrorKind::Connection, format!("'{}': {}", self.db_path, e)))?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    /// Lists every stored game, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a query fails or a row is malformed.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Game>, DbError> {
        let mut conn = self.connection()?;
        let rows = games::table
            .order(games::id.asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;

        let games = rows.into_iter().map(Game::try_from).collect::<Result<Vec<_>, _>>()?;
        info!(count = games.len(), "Games loaded");
        Ok(games)
    }
}

/// Converts a registry id to its column value; ids beyond `i64::MAX` are never stored.
fn key(game_id: GameId) -> Option<i64> {
    i64::try_from(game_id).ok()
}

impl GameStore for GameRepository {
    #[instrument(skip(self, build))]
    fn insert_with(&self, build: &mut dyn FnMut(GameId) -> Game) -> Result<GameId, StoreError> {
        let mut conn = self.connection()?;

        let game_id = conn.immediate_transaction::<_, DbError, _>(|conn| {
            let max: Option<i64> = games::table
                .select(diesel::dsl::max(games::id))
                .get_result(conn)?;
            let next = max.map_or(0, |id| id + 1);
            let game_id = GameId::try_from(next)
                .map_err(|_| DbError::malformed("id", next))?;

            let row = GameRow::try_from(&build(game_id))?;
            diesel::insert_into(games::table).values(&row).execute(conn)?;
            Ok(game_id)
        })?;

        debug!(game_id, "Game inserted");
        Ok(game_id)
    }

    #[instrument(skip(self))]
    fn get(&self, game_id: GameId) -> Result<Option<Game>, StoreError> {
        let Some(key) = key(game_id) else {
            return Ok(None);
        };
        let mut conn = self.connection()?;

        let row = games::table
            .find(key)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(DbError::from)?;

        match row {
            Some(row) => Ok(Some(Game::try_from(row)?)),
            None => {
                debug!(game_id, "Game not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, apply))]
    fn update(&self, game_id: GameId, apply: &mut ApplyFn<'_>) -> Result<Vec<GameEvent>, RegistryError> {
        let key = key(game_id).ok_or(RegistryError::GameNotFound(game_id))?;
        let mut conn = self.connection().map_err(StoreError::from)?;

        let events = conn.immediate_transaction::<_, TxError, _>(|conn| {
            let row = games::table
                .find(key)
                .select(GameRow::as_select())
                .first(conn)
                .optional()?
                .ok_or(RegistryError::GameNotFound(game_id))?;

            let mut game = Game::try_from(row)?;
            let events = apply(&mut game)?;

            let row = GameRow::try_from(&game)?;
            diesel::update(games::table.find(key)).set(&row).execute(conn)?;
            Ok(events)
        })?;

        debug!(game_id, events = events.len(), "Game updated");
        Ok(events)
    }

    #[instrument(skip(self))]
    fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.connection()?;
        let count: i64 = games::table.count().get_result(&mut conn).map_err(DbError::from)?;
        Ok(u64::try_from(count).map_err(|_| DbError::malformed("count(*)", count))?)
    }
}
