//! JSON backend for codecforge.
//!
//! - [`JsonProvider`] — the [`TypeProvider`](codecforge_core::TypeProvider)
//!   for `serde_json::Value`, so any codec can produce and consume JSON trees.
//! - [`JsonFormat`] — text in, text out: serde_json parses and prints, the
//!   codec maps the tree to and from Rust values.
//! - [`JsonError`] — syntax vs. codec failures.

mod error;
mod format;
mod provider;

pub use error::JsonError;
pub use format::{JsonConfig, JsonFormat};
pub use provider::JsonProvider;
