//! Command-line interface for the `tictactoe` binary.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Binary name completions are generated for.
pub const BIN_NAME: &str = "tictactoe";

/// Tic-tac-toe game registry backed by a local SQLite ledger
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Create, accept and play tic-tac-toe games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Acting identity, overriding TICTACTOE_CALLER and the config
    #[arg(long, global = true)]
    pub caller: Option<String>,

    /// Turn mark recorded for the action (defaults to the current Unix time)
    #[arg(long, global = true)]
    pub turn_mark: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a new game with the caller as X
    New,

    /// Join an open game as O
    Accept {
        /// Game to join
        game_id: u64,
    },

    /// Place the caller's mark
    Move {
        /// Game to play in
        game_id: u64,

        /// Row, 0-2
        row: u8,

        /// Column, 0-2
        col: u8,
    },

    /// Print a game's board and status
    Show {
        /// Game to show
        game_id: u64,
    },

    /// List every game
    List,

    /// Print a game's token metadata URI
    TokenUri {
        /// Game to render
        game_id: u64,

        /// Print the decoded JSON document instead of the URI
        #[arg(long)]
        decode: bool,
    },

    /// Print a game's board as SVG
    Svg {
        /// Game to render
        game_id: u64,
    },

    /// Print the version string
    Version,

    /// Generate a shell completion script (bash, zsh, fish, powershell or elvish)
    Completion {
        /// Target shell
        shell: Shell,
    },
}

/// Writes the completion script for `shell` to `out`.
#[instrument(skip(out))]
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, BIN_NAME, out);
    debug!("Completion script written");
}
