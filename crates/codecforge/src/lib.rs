//! # Codecforge
//!
//! Composable codecs for structured data.
//!
//! Describe once how a type maps onto a structured representation, then
//! encode and decode it through any backend: an in-memory tree, JSON, or
//! anything else that implements [`TypeProvider`](prelude::TypeProvider).
//!
//! ## Quick Start
//!
//! ```rust
//! use codecforge::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let codec = group((
//!     codecs::int().field("x", |p: &Point| &p.x),
//!     codecs::int().field("y", |p: &Point| &p.y),
//! ))
//! .create(|x, y| Point { x, y });
//!
//! let json = JsonFormat::default();
//! let text = json.encode_to_string(&codec, &Point { x: 3, y: 4 })?;
//! assert_eq!(text, r#"{"x":3,"y":4}"#);
//! assert_eq!(json.decode_from_str(&codec, &text)?, Point { x: 3, y: 4 });
//! # Ok::<(), CodecforgeError>(())
//! ```

mod error;
pub mod logging;

pub use error::CodecforgeError;

pub use codecforge_core::{codecs, memory};
pub use codecforge_json as json;

/// Everything needed to define and run codecs.
pub mod prelude {
    pub use crate::logging::LogConfig;
    pub use crate::CodecforgeError;

    pub use codecforge_core::memory::{MemoryProvider, Node};
    pub use codecforge_core::{
        codecs, group, Codec, CodecError, CodecGrouper, ConfiguredCodec, DataResult,
        DataResultExt, ErrorKind, ResultMappingFunction, TypeProvider,
    };
    pub use codecforge_json::{JsonConfig, JsonError, JsonFormat, JsonProvider};
}
