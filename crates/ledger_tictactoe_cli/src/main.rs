//! `tictactoe`: command-line host for the ledger tic-tac-toe registry.

#![warn(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use ledger_tictactoe::{Game, GameEvent, GameRegistry, Identity, Mark, Receipt};
use ledger_tictactoe_cli::{AppConfig, CALLER_ENV, Cli, Command, GameRepository, write_completion};
use ledger_tictactoe_metadata::{decode_data_uri, render, render_svg};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db_path) = &cli.db_path {
        config = config.with_db_path(db_path.clone());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Version => {
            println!("tictactoe {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Completion { shell } => {
            write_completion(*shell, &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let repo = GameRepository::new(config.db_path().clone())?;
    repo.migrate()?;
    let registry = GameRegistry::new(repo);

    match &cli.command {
        Command::New => {
            let caller = caller(&cli, &config)?;
            let receipt = registry.create_game(&caller, turn_mark(&cli)?)?;
            print_receipt(&receipt)
        }
        Command::Accept { game_id } => {
            let caller = caller(&cli, &config)?;
            let receipt = registry.accept_game(*game_id, &caller, turn_mark(&cli)?)?;
            print_receipt(&receipt)
        }
        Command::Move { game_id, row, col } => {
            let caller = caller(&cli, &config)?;
            let receipt = registry.make_move(*game_id, &caller, *row, *col, turn_mark(&cli)?)?;
            print_receipt(&receipt)
        }
        Command::Show { game_id } => {
            print_game(&registry.game(*game_id)?)
        }
        Command::List => {
            let games = registry.store().list()?;
            for game in &games {
                println!(
                    "#{} {} {} vs {} ({} moves left)",
                    game.id(),
                    game.phase(),
                    game.player(),
                    game.opponent().map_or("-", Identity::as_str),
                    game.moves_left()
                );
            }
            info!(count = games.len(), "Listed games");
            Ok(())
        }
        Command::TokenUri { game_id, decode } => {
            let uri = render(&registry.game(*game_id)?)?;
            if *decode {
                println!("{}", decode_data_uri(&uri)?.text()?);
            } else {
                println!("{}", uri);
            }
            Ok(())
        }
        Command::Svg { game_id } => {
            println!("{}", render_svg(&registry.game(*game_id)?));
            Ok(())
        }
        Command::Version | Command::Completion { .. } => Ok(()),
    }
}

/// Resolves and normalises the acting identity.
#[instrument(skip(cli, config))]
fn caller(cli: &Cli, config: &AppConfig) -> Result<Identity> {
    let env_caller = std::env::var(CALLER_ENV).ok();
    let Some(raw) = config.resolve_caller(cli.caller.as_deref(), env_caller.as_deref()) else {
        bail!("No caller: pass --caller, set {} or configure default_caller", CALLER_ENV);
    };
    let identity = Identity::new(&raw).with_context(|| format!("Invalid caller '{}'", raw))?;
    debug!(caller = %identity, "Caller resolved");
    Ok(identity)
}

/// Explicit `--turn-mark`, or the current Unix time in seconds.
fn turn_mark(cli: &Cli) -> Result<u64> {
    match cli.turn_mark {
        Some(mark) => Ok(mark),
        None => u64::try_from(chrono::Utc::now().timestamp()).context("System clock is before 1970"),
    }
}

/// Prints each event as one JSON line.
fn print_receipt(receipt: &Receipt) -> Result<()> {
    for event in receipt.events() {
        debug!(game_id = event.game_id(), %event, "Event");
        println!("{}", serde_json::to_string::<GameEvent>(event)?);
    }
    Ok(())
}

/// Prints the board grid followed by the JSON snapshot.
fn print_game(game: &Game) -> Result<()> {
    println!("Game #{} ({})", game.id(), game.phase());
    for mark in [Mark::X, Mark::O] {
        println!("{}: {}", mark, game.seat(mark).map_or("-", Identity::as_str));
    }
    println!("{}", game.board().display());
    match (game.is_finished(), game.winner()) {
        (true, Some(winner)) => println!("Winner: {}", winner),
        (true, None) => println!("Draw"),
        (false, _) => println!("{} to move, {} moves left", game.mark_to_move(), game.moves_left()),
    }
    println!("{}", serde_json::to_string(game)?);
    Ok(())
}
