//! The game registry: create, accept and move.

use crate::action::{Accept, Move};
use crate::contracts::{AcceptContract, Contract, MoveContract};
use crate::store::GameStore;
use crate::{Game, GameEvent, GameId, Identity, Phase, RegistryError, rules};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Outcome of a successful registry call.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct Receipt {
    /// Game the call applied to.
    game_id: GameId,
    /// Events produced by the call, in emission order.
    events: Vec<GameEvent>,
}

impl Receipt {
    /// Consumes the receipt, returning its events.
    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }
}

/// Owns the game collection through a [`GameStore`] and runs the state machine.
///
/// Callers pass their identity and the current external turn mark with
/// every call; the registry keeps no ambient context.
#[derive(Debug, Clone)]
pub struct GameRegistry<S> {
    store: S,
}

impl<S: GameStore> GameRegistry<S> {
    /// Creates a registry over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Opens a new game with `creator` as the player (X).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] if the store cannot allocate the game.
    #[instrument(skip(self, creator), fields(creator = %creator))]
    pub fn create_game(&self, creator: &Identity, turn_mark: u64) -> Result<Receipt, RegistryError> {
        let game_id = self
            .store
            .insert_with(&mut |game_id| Game::open(game_id, creator.clone(), turn_mark))?;

        info!(game_id, "Game created");
        Ok(Receipt::new(
            game_id,
            vec![GameEvent::GameCreated {
                game_id,
                creator: creator.clone(),
            }],
        ))
    }

    /// Seats `acceptor` as the opponent (O) of an open game.
    ///
    /// # Errors
    ///
    /// [`RegistryError::GameNotFound`], [`RegistryError::AlreadyAccepted`] or
    /// [`RegistryError::InvalidOpponent`], checked in that order.
    #[instrument(skip(self, acceptor), fields(acceptor = %acceptor))]
    pub fn accept_game(
        &self,
        game_id: GameId,
        acceptor: &Identity,
        turn_mark: u64,
    ) -> Result<Receipt, RegistryError> {
        let action = Accept::new(acceptor.clone(), turn_mark);

        let events = self
            .store
            .update(game_id, &mut |game| apply_accept(game, &action))
            .inspect_err(|e| warn!(game_id, error = %e, "Accept rejected"))?;

        info!(game_id, "Game accepted");
        Ok(Receipt::new(game_id, events))
    }

    /// Places the caller's mark at `(row, col)`.
    ///
    /// On success the events are `MovePlayed`, followed by `GameWon` if the
    /// move completed a line or `GameDrawn` if it filled the board.
    ///
    /// # Errors
    ///
    /// In checking order: [`RegistryError::GameNotFound`],
    /// [`RegistryError::GameFinished`], [`RegistryError::OutOfBounds`],
    /// [`RegistryError::OpponentNotSet`], [`RegistryError::UnauthorizedCaller`],
    /// [`RegistryError::WrongTurn`], [`RegistryError::CellOccupied`],
    /// [`RegistryError::TurnMarkRegressed`]. A rejected move changes nothing.
    #[instrument(skip(self, caller), fields(caller = %caller))]
    pub fn make_move(
        &self,
        game_id: GameId,
        caller: &Identity,
        row: u8,
        col: u8,
        turn_mark: u64,
    ) -> Result<Receipt, RegistryError> {
        let action = Move::new(caller.clone(), row, col, turn_mark);

        let events = self
            .store
            .update(game_id, &mut |game| apply_move(game, &action))
            .inspect_err(|e| warn!(game_id, error = %e, "Move rejected"))?;

        info!(game_id, row, col, events = events.len(), "Move applied");
        Ok(Receipt::new(game_id, events))
    }

    /// Returns a snapshot of a game.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::GameNotFound`] for unknown ids.
    #[instrument(skip(self))]
    pub fn game(&self, game_id: GameId) -> Result<Game, RegistryError> {
        self.store
            .get(game_id)?
            .ok_or(RegistryError::GameNotFound(game_id))
    }

    /// Returns the lifecycle phase of a game.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::GameNotFound`] for unknown ids.
    pub fn phase(&self, game_id: GameId) -> Result<Phase, RegistryError> {
        Ok(self.game(game_id)?.phase())
    }

    /// Number of games created so far. Ids run from 0 to `game_count() - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on substrate failure.
    pub fn game_count(&self) -> Result<u64, RegistryError> {
        Ok(self.store.count()?)
    }
}

#[instrument(skip(game), fields(game_id = game.id()))]
fn apply_accept(game: &mut Game, action: &Accept) -> Result<Vec<GameEvent>, RegistryError> {
    #[cfg(debug_assertions)]
    let before = game.clone();

    AcceptContract::pre(game, action)?;
    game.seat_opponent(action.acceptor.clone(), action.turn_mark);

    #[cfg(debug_assertions)]
    AcceptContract::post(&before, game)?;

    Ok(vec![GameEvent::GameAccepted {
        game_id: game.id(),
        acceptor: action.acceptor.clone(),
        creator: game.player().clone(),
    }])
}

#[instrument(skip(game), fields(game_id = game.id()))]
fn apply_move(game: &mut Game, action: &Move) -> Result<Vec<GameEvent>, RegistryError> {
    #[cfg(debug_assertions)]
    let before = game.clone();

    MoveContract::pre(game, action)?;
    let pos = action.position().ok_or(RegistryError::OutOfBounds {
        row: action.row,
        col: action.col,
    })?;

    let mark = game.mark_to_move();
    game.place(pos, mark, action.turn_mark);
    debug!(%pos, %mark, moves_left = game.moves_left(), "Mark placed");

    let mut events = vec![GameEvent::MovePlayed {
        game_id: game.id(),
        mover: action.caller.clone(),
        row: action.row,
        col: action.col,
    }];

    if rules::completes_line(game.board(), pos, mark) {
        game.finish(Some(action.caller.clone()));
        info!(game_id = game.id(), winner = %action.caller, "Game won");
        events.push(GameEvent::GameWon {
            game_id: game.id(),
            winner: action.caller.clone(),
            row: action.row,
            col: action.col,
        });
    } else if game.moves_left() == 0 {
        game.finish(None);
        info!(game_id = game.id(), "Game drawn");
        events.push(GameEvent::GameDrawn { game_id: game.id() });
    }

    #[cfg(debug_assertions)]
    MoveContract::post(&before, game)?;

    Ok(events)
}
