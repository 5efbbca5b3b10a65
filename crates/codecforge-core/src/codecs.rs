//! Ready-made codecs for the primitive types.
//!
//! ```rust
//! use codecforge_core::{codecs, Codec};
//! use codecforge_core::memory::{MemoryProvider, Node};
//!
//! let tags = codecs::list(codecs::string());
//! let encoded = tags.encode(&MemoryProvider, &vec!["a".to_string()]).unwrap();
//! assert_eq!(encoded, Node::List(vec![Node::from("a")]));
//! ```

use crate::primitive::{
    BoolCodec, FloatCodec, IntegerCodec, ListCodec, OptionalCodec, StringCodec,
};
use crate::Codec;

pub const fn boolean() -> BoolCodec {
    BoolCodec
}

pub const fn byte() -> IntegerCodec<i8> {
    IntegerCodec::new()
}

pub const fn short() -> IntegerCodec<i16> {
    IntegerCodec::new()
}

pub const fn int() -> IntegerCodec<i32> {
    IntegerCodec::new()
}

pub const fn long() -> IntegerCodec<i64> {
    IntegerCodec::new()
}

pub const fn unsigned_byte() -> IntegerCodec<u8> {
    IntegerCodec::new()
}

pub const fn unsigned_short() -> IntegerCodec<u16> {
    IntegerCodec::new()
}

pub const fn unsigned_int() -> IntegerCodec<u32> {
    IntegerCodec::new()
}

/// Values above `i64::MAX` cannot be encoded.
pub const fn unsigned_long() -> IntegerCodec<u64> {
    IntegerCodec::new()
}

pub const fn float() -> FloatCodec<f32> {
    FloatCodec::new()
}

pub const fn double() -> FloatCodec<f64> {
    FloatCodec::new()
}

pub const fn string() -> StringCodec {
    StringCodec
}

pub fn list<C: Codec>(codec: C) -> ListCodec<C> {
    ListCodec::new(codec)
}

pub fn optional<C: Codec>(codec: C) -> OptionalCodec<C> {
    OptionalCodec::new(codec)
}
