//! Backend-agnostic codec combinators.
//!
//! This crate describes, once, how a typed value transcodes to and from a
//! structured representation, whatever that representation is:
//!
//! - **Results** ([`DataResult`], [`CodecError`]) — every operation returns
//!   its failure as a value; nothing throws.
//! - **Backends** ([`TypeProvider`]) — the only thing that knows what a
//!   representation value looks like inside.
//! - **Codecs** ([`Codec`], [`codecs`]) — one transcoding rule per type.
//! - **Fields and groups** ([`ConfiguredCodec`], [`CodecGrouper`]) — bind
//!   codecs to the fields of a struct and assemble them into a codec for the
//!   whole struct.
//! - **Mapping** ([`ResultMappingFunction`]) — derive codecs from codecs.
//!
//! # Architecture
//!
//! ```text
//! field codecs → CodecGrouper::create(constructor) → Codec<O>
//!                                                    │
//!                         TypeProvider (JSON, Node, ...) ←─ encode / decode
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod configured;
mod error;
mod group;
mod mapping;
mod primitive;
mod provider;
mod result;

pub mod codecs;
pub mod memory;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
pub use configured::{ConfiguredCodec, FieldCodec};
pub use error::{CodecError, ErrorKind, Operation};
pub use group::{
    group, CodecGrouper, ComponentFailure, ComponentList, GroupedCodec, GroupingFunction,
};
pub use mapping::{MappedCodec, ResultMappingFunction};
pub use primitive::{
    BoolCodec, Float, FloatCodec, IntegerCodec, ListCodec, OptionalCodec, StringCodec,
};
pub use provider::{MapView, TypeProvider};
pub use result::{DataResult, DataResultExt};
