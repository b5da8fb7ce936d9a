//! Storage substrate seam and the in-memory implementation.

use crate::{Game, GameEvent, GameId, RegistryError, StoreError};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Closure applied to one game inside [`GameStore::update`].
pub type ApplyFn<'a> = dyn FnMut(&mut Game) -> Result<Vec<GameEvent>, RegistryError> + 'a;

/// Storage for the game collection.
///
/// Implementations provide the serialization the registry relies on:
/// id allocation is atomic with insertion, and `update` applies its closure
/// to one game with no other mutation of that game in between.
pub trait GameStore {
    /// Allocates the next sequential id, builds the game for it and inserts it.
    fn insert_with(&self, build: &mut dyn FnMut(GameId) -> Game) -> Result<GameId, StoreError>;

    /// Reads a snapshot of a game.
    fn get(&self, game_id: GameId) -> Result<Option<Game>, StoreError>;

    /// Applies `apply` to a staged copy of the game and writes it back only
    /// when `apply` succeeds.
    ///
    /// # Errors
    ///
    /// [`RegistryError::GameNotFound`] for unknown ids, the closure's own
    /// rejection, or [`RegistryError::Store`] on substrate failure.
    fn update(&self, game_id: GameId, apply: &mut ApplyFn<'_>) -> Result<Vec<GameEvent>, RegistryError>;

    /// Number of games ever created.
    fn count(&self) -> Result<u64, StoreError>;
}

/// In-memory store. Games are indexed by id; the mutex is the single
/// serialization point for every game.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: Arc<Mutex<Vec<Game>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating in-memory game store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Game>>, StoreError> {
        self.games
            .lock()
            .map_err(|e| StoreError::new(format!("Game store lock poisoned: {}", e)))
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, build))]
    fn insert_with(&self, build: &mut dyn FnMut(GameId) -> Game) -> Result<GameId, StoreError> {
        let mut games = self.lock()?;
        let game_id = games.len() as GameId;
        games.push(build(game_id));
        debug!(game_id, "Game inserted");
        Ok(game_id)
    }

    #[instrument(skip(self))]
    fn get(&self, game_id: GameId) -> Result<Option<Game>, StoreError> {
        let games = self.lock()?;
        let game = usize::try_from(game_id)
            .ok()
            .and_then(|idx| games.get(idx))
            .cloned();
        if game.is_none() {
            debug!(game_id, "Game not found");
        }
        Ok(game)
    }

    #[instrument(skip(self, apply))]
    fn update(&self, game_id: GameId, apply: &mut ApplyFn<'_>) -> Result<Vec<GameEvent>, RegistryError> {
        let mut games = self.lock()?;
        let idx = usize::try_from(game_id)
            .ok()
            .filter(|idx| *idx < games.len())
            .ok_or(RegistryError::GameNotFound(game_id))?;

        let mut staged = games[idx].clone();
        let events = apply(&mut staged)?;
        games[idx] = staged;
        debug!(game_id, events = events.len(), "Game updated");
        Ok(events)
    }

    #[instrument(skip(self))]
    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }
}
