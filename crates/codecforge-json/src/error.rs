//! Error types for the JSON backend.

use codecforge_core::CodecError;

/// Errors from reading or writing JSON text through a codec.
///
/// Codec failures and syntax failures are kept apart: a `Syntax` error means
/// the text was never valid JSON, a `Codec` error means it was valid JSON of
/// the wrong shape.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The codec rejected the value or the parsed tree.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(serde_json::Error),

    /// serde_json failed to write the encoded tree.
    #[error("unable to write JSON: {0}")]
    Write(serde_json::Error),
}
