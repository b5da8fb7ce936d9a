//! Deterministic token metadata for ledger tic-tac-toe games.
//!
//! A game snapshot is projected into an SVG board, wrapped as a base64
//! `data:` URI inside a JSON metadata document, which is itself returned as
//! a base64 `data:` URI. No timestamps, randomness or I/O are involved, so
//! equal snapshots render to equal bytes.
//!
//! # Example
//!
//! ```
//! use ledger_tictactoe::{GameRegistry, Identity, MemoryStore};
//! use ledger_tictactoe_metadata::{TokenMetadata, render};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GameRegistry::new(MemoryStore::new());
//! registry.create_game(&Identity::new("0xA11CE")?, 1)?;
//!
//! let uri = render(&registry.game(0)?)?;
//! assert!(uri.starts_with("data:application/json;base64,"));
//! assert_eq!(TokenMetadata::from_token_uri(&uri)?.name(), "Game #0");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod data_uri;
mod error;
mod metadata;
mod svg;

pub use data_uri::{DataUri, JSON_MIME, SVG_MIME, decode_data_uri, encode_data_uri};
pub use error::RenderError;
pub use metadata::{
    Attribute, AttributeValue, DESCRIPTION, NONE_PLACEHOLDER, STATUS_FINISHED,
    STATUS_IN_PROGRESS, TokenMetadata, metadata, render,
};
pub use svg::{CANVAS, render_svg};
