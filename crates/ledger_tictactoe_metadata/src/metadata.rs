//! Token metadata document.

use crate::data_uri::{JSON_MIME, SVG_MIME, decode_data_uri, encode_data_uri};
use crate::{RenderError, render_svg};
use derive_getters::Getters;
use ledger_tictactoe::Game;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Fixed description carried by every token.
pub const DESCRIPTION: &str = "On-chain Tic Tac Toe game";

/// Text shown for a missing opponent or winner.
pub const NONE_PLACEHOLDER: &str = "None";

/// Status text of a running or open game.
pub const STATUS_IN_PROGRESS: &str = "In Progress";

/// Status text of a won or drawn game.
pub const STATUS_FINISHED: &str = "Finished";

/// Value of a metadata attribute: text, or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Rendered as a JSON string.
    Text(String),
    /// Rendered as a JSON number.
    Number(u64),
}

/// A `trait_type` / `value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Attribute {
    trait_type: String,
    value: AttributeValue,
}

impl Attribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
        }
    }

    fn number(trait_type: &str, value: u64) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Number(value),
        }
    }
}

/// Metadata document of one game. Serializes with keys in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TokenMetadata {
    name: String,
    description: String,
    image: String,
    attributes: Vec<Attribute>,
}

impl TokenMetadata {
    /// Looks up an attribute value by `trait_type`.
    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }

    /// Parses a token URI produced by [`render`] back into metadata.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the URI framing or the JSON is malformed.
    #[instrument(skip(uri))]
    pub fn from_token_uri(uri: &str) -> Result<Self, RenderError> {
        let data = decode_data_uri(uri)?;
        Ok(serde_json::from_slice(&data.payload)?)
    }
}

/// Builds the metadata document for `game`, image included.
#[instrument(skip(game), fields(game_id = game.id()))]
pub fn metadata(game: &Game) -> TokenMetadata {
    let image = encode_data_uri(SVG_MIME, render_svg(game).as_bytes());

    let opponent = game
        .opponent()
        .map_or_else(|| NONE_PLACEHOLDER.to_string(), ToString::to_string);
    let winner = game
        .winner()
        .map_or_else(|| NONE_PLACEHOLDER.to_string(), ToString::to_string);
    let status = if game.is_finished() {
        STATUS_FINISHED
    } else {
        STATUS_IN_PROGRESS
    };

    TokenMetadata {
        name: format!("Game #{}", game.id()),
        description: DESCRIPTION.to_string(),
        image,
        attributes: vec![
            Attribute::text("Game ID", game.id().to_string()),
            Attribute::text("Player", game.player().to_string()),
            Attribute::text("Opponent", opponent),
            Attribute::text("Status", status),
            Attribute::text("Winner", winner),
            Attribute::number("Moves Left", u64::from(game.moves_left())),
        ],
    }
}

/// Renders the token URI of `game`: `data:application/json;base64,...`.
///
/// Pure: the same game always yields the same bytes.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if serialization fails.
#[instrument(skip(game), fields(game_id = game.id()))]
pub fn render(game: &Game) -> Result<String, RenderError> {
    let json = serde_json::to_string(&metadata(game))?;
    debug!(bytes = json.len(), "Metadata serialized");
    Ok(encode_data_uri(JSON_MIME, json.as_bytes()))
}
