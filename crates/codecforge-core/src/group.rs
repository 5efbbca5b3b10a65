//! Product-type codecs assembled from field codecs.
//!
//! A [`CodecGrouper`] holds a tuple of 1 to 16 [`FieldCodec`]s that all
//! belong to the same containing type `O`. Handing it a constructor with a
//! matching arity yields one [`GroupedCodec`] for `O`:
//!
//! ```rust
//! use codecforge_core::{codecs, Codec, CodecGrouper};
//! use codecforge_core::memory::{MemoryProvider, Node};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let codec = CodecGrouper::new((
//!     codecs::int().field("x", |p: &Point| &p.x),
//!     codecs::int().field("y", |p: &Point| &p.y),
//! ))
//! .create(|x, y| Point { x, y });
//!
//! let encoded = codec.encode(&MemoryProvider, &Point { x: 3, y: 4 }).unwrap();
//! assert_eq!(encoded, Node::map([("x", Node::Integer(3)), ("y", Node::Integer(4))]));
//! assert_eq!(codec.decode(&MemoryProvider, &encoded), Ok(Point { x: 3, y: 4 }));
//! ```
//!
//! # How the arities work
//!
//! Two traits carry the variadic part, both implemented for tuples by the
//! `impl_group!` macro below:
//!
//! - [`ComponentList`] — a tuple of field codecs. Encodes them in declaration
//!   order into one map and decodes them into a tuple of values.
//! - [`GroupingFunction`] — any `Fn(A1, .., AN) -> O`, called with that tuple
//!   spread out into arguments.
//!
//! Both stop at the first failing component.

use std::fmt;
use std::marker::PhantomData;

use crate::{Codec, CodecError, DataResult, FieldCodec, MapView, Operation, TypeProvider};

// ---------------------------------------------------------------------------
// Variadic plumbing
// ---------------------------------------------------------------------------

/// A failure inside a [`ComponentList`], before the grouped codec adds the
/// aggregate's context.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFailure {
    /// Zero-based position of the component in the tuple.
    pub index: usize,
    /// String form of the component.
    pub component: String,
    /// The component's own error.
    pub error: CodecError,
}

impl ComponentFailure {
    fn new(index: usize, component: &dyn fmt::Display, error: CodecError) -> Self {
        Self {
            index,
            component: component.to_string(),
            error,
        }
    }
}

/// An ordered, fixed-length tuple of field codecs for `O`.
pub trait ComponentList<O>: Send + Sync {
    /// The decoded field values, as a tuple in declaration order.
    type Values;

    /// Number of components.
    const LEN: usize;

    /// Encodes every component of `object` into `map`, in order.
    fn encode_all<P: TypeProvider>(
        &self,
        provider: &P,
        map: P::Value,
        object: &O,
    ) -> Result<P::Value, ComponentFailure>;

    /// Decodes every component from the same map view, in order.
    fn decode_all<P: TypeProvider>(
        &self,
        provider: &P,
        map: &MapView<'_, P::Value>,
    ) -> Result<Self::Values, ComponentFailure>;

    /// Writes the components' string forms, comma separated.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// A constructor taking the decoded field values as separate arguments.
pub trait GroupingFunction<Args, O>: Send + Sync {
    fn create(&self, args: Args) -> O;
}

macro_rules! impl_group {
    ($($idx:tt => $F:ident : $A:ident),+) => {
        impl<O, $($F),+> ComponentList<O> for ($($F,)+)
        where
            $($F: FieldCodec<O>,)+
        {
            type Values = ($($F::Value,)+);

            const LEN: usize = [$($idx),+].len();

            fn encode_all<P: TypeProvider>(
                &self,
                provider: &P,
                map: P::Value,
                object: &O,
            ) -> Result<P::Value, ComponentFailure> {
                $(
                    let map = self.$idx
                        .encode_field(provider, map, object)
                        .map_err(|e| ComponentFailure::new($idx, &self.$idx, e))?;
                )+
                Ok(map)
            }

            fn decode_all<P: TypeProvider>(
                &self,
                provider: &P,
                map: &MapView<'_, P::Value>,
            ) -> Result<Self::Values, ComponentFailure> {
                Ok(($(
                    self.$idx
                        .decode_field(provider, map)
                        .map_err(|e| ComponentFailure::new($idx, &self.$idx, e))?,
                )+))
            }

            fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let parts: &[&dyn fmt::Display] = &[$(&self.$idx),+];
                for (index, part) in parts.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }

        impl<Func, O, $($A),+> GroupingFunction<($($A,)+), O> for Func
        where
            Func: Fn($($A),+) -> O + Send + Sync,
        {
            #[allow(non_snake_case)]
            fn create(&self, ($($A,)+): ($($A,)+)) -> O {
                (self)($($A),+)
            }
        }
    };
}

impl_group!(0 => F1: A1);
impl_group!(0 => F1: A1, 1 => F2: A2);
impl_group!(0 => F1: A1, 1 => F2: A2, 2 => F3: A3);
impl_group!(0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4);
impl_group!(0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5);
impl_group!(0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11, 11 => F12: A12
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11, 11 => F12: A12,
    12 => F13: A13
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11, 11 => F12: A12,
    12 => F13: A13, 13 => F14: A14
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11, 11 => F12: A12,
    12 => F13: A13, 13 => F14: A14, 14 => F15: A15
);
impl_group!(
    0 => F1: A1, 1 => F2: A2, 2 => F3: A3, 3 => F4: A4, 4 => F5: A5, 5 => F6: A6,
    6 => F7: A7, 7 => F8: A8, 8 => F9: A9, 9 => F10: A10, 10 => F11: A11, 11 => F12: A12,
    12 => F13: A13, 13 => F14: A14, 14 => F15: A15, 15 => F16: A16
);

// ---------------------------------------------------------------------------
// CodecGrouper
// ---------------------------------------------------------------------------

/// A tuple of field codecs waiting for its constructor.
///
/// The components are fully built values, so there is nothing left to
/// validate here; each [`ConfiguredCodec`](crate::ConfiguredCodec) already
/// checked its own key when it was created.
#[derive(Debug, Clone)]
pub struct CodecGrouper<C> {
    components: C,
}

impl<C> CodecGrouper<C> {
    pub fn new(components: C) -> Self {
        Self { components }
    }

    /// Closes over the components and `function`, producing the codec
    /// for `O`.
    pub fn create<O, F>(self, function: F) -> GroupedCodec<C, F, O>
    where
        C: ComponentList<O>,
        F: GroupingFunction<C::Values, O>,
    {
        GroupedCodec {
            components: self.components,
            function,
            _output: PhantomData,
        }
    }
}

/// Shorthand for [`CodecGrouper::new`].
pub fn group<C>(components: C) -> CodecGrouper<C> {
    CodecGrouper::new(components)
}

// ---------------------------------------------------------------------------
// GroupedCodec
// ---------------------------------------------------------------------------

/// The codec produced by [`CodecGrouper::create`].
///
/// Encodes `O` as a map with one entry per component and decodes it back
/// by decoding every component and calling the constructor.
pub struct GroupedCodec<C, F, O> {
    components: C,
    function: F,
    _output: PhantomData<fn() -> O>,
}

impl<C, F, O> GroupedCodec<C, F, O>
where
    C: ComponentList<O>,
{
    /// Number of fields in the group.
    pub fn len(&self) -> usize {
        C::LEN
    }

    pub fn is_empty(&self) -> bool {
        C::LEN == 0
    }
}

impl<C, F, O> Codec for GroupedCodec<C, F, O>
where
    O: fmt::Debug,
    C: ComponentList<O>,
    F: GroupingFunction<C::Values, O>,
{
    type Value = O;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&O>,
    ) -> DataResult<P::Value> {
        let object = value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        let map = provider.merge(current, provider.create_map())?;
        match self.components.encode_all(provider, map, object) {
            Ok(map) => {
                tracing::trace!(codec = %self, "grouped encode finished");
                Ok(map)
            }
            Err(failure) => {
                tracing::debug!(
                    index = failure.index,
                    component = %failure.component,
                    error = %failure.error,
                    "grouped encode failed"
                );
                Err(CodecError::EncodeComponent {
                    subject: format!("{object:?}"),
                    codec: failure.component,
                    source: Box::new(failure.error),
                })
            }
        }
    }

    fn decode_start<P: TypeProvider>(&self, provider: &P, value: Option<&P::Value>) -> DataResult<O> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        let map = provider.get_map(value)?;
        match self.components.decode_all(provider, &map) {
            Ok(values) => {
                tracing::trace!(codec = %self, "grouped decode finished");
                Ok(self.function.create(values))
            }
            Err(failure) => {
                tracing::debug!(
                    index = failure.index,
                    component = %failure.component,
                    error = %failure.error,
                    "grouped decode failed"
                );
                Err(CodecError::DecodeComponent {
                    subject: format!("{value:?}"),
                    codec: failure.component,
                    source: Box::new(failure.error),
                })
            }
        }
    }
}

impl<C, F, O> fmt::Display for GroupedCodec<C, F, O>
where
    C: ComponentList<O>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GroupedCodec[")?;
        self.components.describe(f)?;
        f.write_str("]")
    }
}
