//! `data:` URI framing with base64 payloads.

use crate::RenderError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::instrument;

/// MIME type of the embedded board image.
pub const SVG_MIME: &str = "image/svg+xml";

/// MIME type of the metadata document.
pub const JSON_MIME: &str = "application/json";

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared MIME type.
    pub mime: String,
    /// Decoded payload bytes.
    pub payload: Vec<u8>,
}

impl DataUri {
    /// Payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Utf8`] if the payload is not valid UTF-8.
    pub fn text(&self) -> Result<&str, RenderError> {
        std::str::from_utf8(&self.payload).map_err(|e| RenderError::Utf8(e.to_string()))
    }
}

/// Frames `payload` as `data:<mime>;base64,<standard base64>`.
pub fn encode_data_uri(mime: &str, payload: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(payload))
}

/// Parses a base64 `data:` URI back into its MIME type and payload.
///
/// # Errors
///
/// [`RenderError::NotADataUri`] when the framing is missing,
/// [`RenderError::UnsupportedEncoding`] for non-base64 URIs and
/// [`RenderError::Base64`] for a malformed payload.
#[instrument(skip(uri), fields(len = uri.len()))]
pub fn decode_data_uri(uri: &str) -> Result<DataUri, RenderError> {
    let rest = uri.strip_prefix("data:").ok_or(RenderError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(RenderError::NotADataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| RenderError::UnsupportedEncoding(header.to_string()))?;

    Ok(DataUri {
        mime: mime.to_string(),
        payload: STANDARD.decode(payload)?,
    })
}
