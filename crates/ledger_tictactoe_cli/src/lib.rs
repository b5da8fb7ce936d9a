//! SQLite-backed host for the ledger tic-tac-toe registry.
//!
//! Provides the [`GameRepository`] store, the [`AppConfig`] settings layer
//! and the [`Cli`] definition of the `tictactoe` binary built on them.
//!
//! # Example
//!
//! ```no_run
//! use ledger_tictactoe::{GameRegistry, Identity};
//! use ledger_tictactoe_cli::GameRepository;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repo = GameRepository::new("tictactoe.db".to_string())?;
//! repo.migrate()?;
//!
//! let registry = GameRegistry::new(repo);
//! let receipt = registry.create_game(&Identity::new("0xA11CE")?, 1)?;
//! println!("created game {}", receipt.game_id());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod db;

pub use cli::{BIN_NAME, Cli, Command, write_completion};
pub use config::{AppConfig, CALLER_ENV, ConfigError, DEFAULT_CONFIG_FILE};
pub use db::{DbError, DbErrorKind, GameRepository, GameRow};
