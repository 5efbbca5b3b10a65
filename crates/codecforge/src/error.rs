//! Unified error type for the codecforge crates.

use codecforge_core::CodecError;
use codecforge_json::JsonError;

/// Top-level error wrapping every crate-specific error.
///
/// `?` converts the sub-crate errors through the generated `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum CodecforgeError {
    /// A codec rejected a value or a representation.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// JSON text could not be read or written.
    #[error(transparent)]
    Json(#[from] JsonError),

    /// The global tracing subscriber could not be installed.
    #[error("unable to install logging: {0}")]
    Logging(String),
}
