//! Renderer error type.

use derive_more::Display;

/// Error producing or reading a token document.
#[derive(Debug, Display)]
pub enum RenderError {
    /// Metadata could not be serialized or parsed.
    #[display("JSON error: {}", _0)]
    Json(serde_json::Error),

    /// The input does not start with `data:` or lacks a payload separator.
    #[display("Not a data URI")]
    NotADataUri,

    /// The URI is not base64-encoded.
    #[display("Unsupported data URI encoding: {}", _0)]
    UnsupportedEncoding(String),

    /// The payload is not valid base64.
    #[display("Base64 error: {}", _0)]
    Base64(base64::DecodeError),

    /// The payload is not valid UTF-8.
    #[display("UTF-8 error: {}", _0)]
    Utf8(String),
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<base64::DecodeError> for RenderError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err)
    }
}
