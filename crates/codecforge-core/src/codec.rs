//! The [`Codec`] trait: one bidirectional transcoding rule for one type.
//!
//! A codec converts between a Rust value and a representation value owned
//! by some backend. The codec does not care WHICH backend: it only talks to
//! the [`TypeProvider`] it is handed on each call. The same `Codec` value can
//! therefore write JSON in one call and an in-memory [`Node`](crate::memory::Node)
//! tree in the next.
//!
//! Codecs are stateless rules, not values. Build them once, keep them
//! around (in a `static`, an `Arc`, a struct field) and call them from as
//! many threads as you like.
//!
//! ## Composing
//!
//! The provided methods on the trait derive new codecs from existing ones:
//!
//! - [`Codec::field`] binds a codec to a key and an accessor, producing a
//!   [`ConfiguredCodec`] ready for a [`CodecGrouper`](crate::CodecGrouper)
//! - [`Codec::list`] / [`Codec::optional`] lift a codec to `Vec<T>` / `Option<T>`
//! - [`Codec::xmap`] / [`Codec::flat_xmap`] / [`Codec::map_result`] convert
//!   the value type through mapping functions

use std::fmt;

use crate::mapping::{MappedCodec, ResultMappingFunction};
use crate::primitive::{ListCodec, OptionalCodec};
use crate::{ConfiguredCodec, DataResult, TypeProvider};

/// A bidirectional transcoder for [`Codec::Value`].
///
/// ## Trait bounds explained
///
/// - `Display` → every codec has a string form. It shows up in error
///   messages ("Unable to decode null value using 'Integer<i32>'"), so
///   failures can be traced without a stack trace.
/// - `Send + Sync` → codecs are shared between threads freely.
///
/// ## Contract
///
/// Both operations are total: they never panic, every failure is an `Err`.
/// Both are deterministic and never mutate caller data; `encode_start`
/// consumes `current` and hands back whatever the provider's `merge` made
/// of it.
pub trait Codec: fmt::Display + Send + Sync {
    /// The Rust type this codec handles.
    type Value;

    /// Encodes `value` and merges it into `current`.
    ///
    /// `value` is `None` for absent optional values. What happens then is up
    /// to the codec; the built-in ones fail with
    /// [`CodecError::NullValue`](crate::CodecError::NullValue), except
    /// [`OptionalCodec`] which leaves `current` untouched.
    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&Self::Value>,
    ) -> DataResult<P::Value>;

    /// Decodes a value from `value`.
    ///
    /// `None` means "nothing there" (e.g. an absent map key).
    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<Self::Value>;

    /// Encodes `value` on its own, starting from the provider's null value.
    fn encode<P: TypeProvider>(&self, provider: &P, value: &Self::Value) -> DataResult<P::Value> {
        self.encode_start(provider, provider.null(), Some(value))
    }

    /// Decodes a present representation value.
    fn decode<P: TypeProvider>(&self, provider: &P, value: &P::Value) -> DataResult<Self::Value> {
        self.decode_start(provider, Some(value))
    }

    /// Returns `true` if `value` stands for "nothing there".
    ///
    /// A field whose value is absent writes no map entry at all. Only
    /// [`OptionalCodec`] says yes, for `None`.
    fn is_absent(&self, value: &Self::Value) -> bool {
        let _ = value;
        false
    }

    /// Binds this codec to the field `key` of `O`, read through `getter`.
    ///
    /// # Panics
    /// Panics if `key` is empty.
    fn field<O, G>(self, key: impl Into<String>, getter: G) -> ConfiguredCodec<Self, O, G>
    where
        Self: Sized,
        G: Fn(&O) -> &Self::Value + Send + Sync,
    {
        ConfiguredCodec::new(self, key, getter)
    }

    /// A codec for `Vec<Self::Value>`.
    fn list(self) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec::new(self)
    }

    /// A codec for `Option<Self::Value>` that treats absence as `None`.
    fn optional(self) -> OptionalCodec<Self>
    where
        Self: Sized,
    {
        OptionalCodec::new(self)
    }

    /// Converts through two infallible functions.
    fn xmap<T, ToFn, FromFn>(self, to: ToFn, from: FromFn) -> MappedCodec<Self, T>
    where
        Self: Sized,
        Self::Value: Clone + 'static,
        T: Clone + 'static,
        ToFn: Fn(Self::Value) -> T + Send + Sync + 'static,
        FromFn: Fn(T) -> Self::Value + Send + Sync + 'static,
    {
        self.map_result(
            ResultMappingFunction::direct(to),
            ResultMappingFunction::direct(from),
        )
    }

    /// Converts through two fallible functions. Their errors become
    /// [`CodecError::Custom`](crate::CodecError::Custom) messages.
    fn flat_xmap<T, E1, E2, ToFn, FromFn>(self, to: ToFn, from: FromFn) -> MappedCodec<Self, T>
    where
        Self: Sized,
        Self::Value: Clone + 'static,
        T: Clone + 'static,
        E1: fmt::Display,
        E2: fmt::Display,
        ToFn: Fn(Self::Value) -> Result<T, E1> + Send + Sync + 'static,
        FromFn: Fn(T) -> Result<Self::Value, E2> + Send + Sync + 'static,
    {
        self.map_result(
            ResultMappingFunction::throwable(to),
            ResultMappingFunction::throwable(from),
        )
    }

    /// Converts through two result-level mapping functions.
    ///
    /// `decode` runs after this codec decoded; `encode` runs before it
    /// encodes.
    fn map_result<T>(
        self,
        decode: ResultMappingFunction<Self::Value, T>,
        encode: ResultMappingFunction<T, Self::Value>,
    ) -> MappedCodec<Self, T>
    where
        Self: Sized,
        T: Clone,
    {
        MappedCodec::new(self, decode, encode)
    }
}
