//! Ledger tic-tac-toe - the game registry and state machine.
//!
//! Games live in a shared registry behind a [`GameStore`]. Two identities
//! play: the creator (X) opens a game, another identity accepts it (O), and
//! moves alternate until a line is completed or the board fills up.
//!
//! # Architecture
//!
//! - **Registry**: create / accept / move over any [`GameStore`]
//! - **Contracts**: ordered preconditions, debug-build postconditions
//! - **Invariants**: composable consistency checks over [`Game`]
//! - **Rules**: win and draw detection on a [`Board`]
//!
//! # Example
//!
//! ```
//! use ledger_tictactoe::{GameEvent, GameRegistry, Identity, MemoryStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GameRegistry::new(MemoryStore::new());
//! let alice = Identity::new("0xA11CE")?;
//! let bob = Identity::new("0xB0B")?;
//!
//! let game_id = *registry.create_game(&alice, 1)?.game_id();
//! registry.accept_game(game_id, &bob, 2)?;
//! let receipt = registry.make_move(game_id, &alice, 1, 1, 3)?;
//! assert!(matches!(receipt.events()[0], GameEvent::MovePlayed { row: 1, col: 1, .. }));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod error;
mod event;
mod game;
pub mod invariants;
mod position;
mod registry;
pub mod rules;
mod store;
mod types;

pub use action::{Accept, Move};
pub use contracts::{
    AcceptContract, CallerSeated, CallersTurn, CellIsEmpty, Contract, GameInPlay, LegalMove,
    MoveContract, OpponentSeated, TurnMarkAdvances, WithinBoard,
};
pub use error::{RegistryError, StoreError};
pub use event::GameEvent;
pub use game::{Game, GameParts, Phase};
pub use position::Position;
pub use registry::{GameRegistry, Receipt};
pub use store::{ApplyFn, GameStore, MemoryStore};
pub use types::{Board, BoardParseError, Cell, GameId, Identity, IdentityError, Mark, TurnMarks};
