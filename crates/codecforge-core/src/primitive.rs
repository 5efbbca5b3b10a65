//! Leaf codecs (booleans, numbers, strings) and the list/optional lifts.
//!
//! Every leaf works the same way: on encode, create the scalar through the
//! provider and `merge` it into `current`; on decode, ask the provider for
//! the matching view. An absent value is a [`CodecError::NullValue`].

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{Codec, CodecError, DataResult, Operation, TypeProvider};

// ---------------------------------------------------------------------------
// Booleans and strings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&bool>,
    ) -> DataResult<P::Value> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        provider.merge(current, provider.create_boolean(*value))
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<bool> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        provider.get_boolean(value)
    }
}

impl fmt::Display for BoolCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bool")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&String>,
    ) -> DataResult<P::Value> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        provider.merge(current, provider.create_string(value))
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<String> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        provider.get_string(value).map(str::to_owned)
    }
}

impl fmt::Display for StringCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "String")
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Codec for any primitive integer that round-trips through `i64`.
///
/// Values that do not fit (a `u64` above `i64::MAX` on encode, a `300` decoded
/// as `u8`) fail with [`CodecError::OutOfRange`].
pub struct IntegerCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> IntegerCodec<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for IntegerCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IntegerCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IntegerCodec<T> {}

impl<T> Codec for IntegerCodec<T>
where
    T: Copy + fmt::Display + TryFrom<i64>,
    i64: TryFrom<T>,
{
    type Value = T;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&T>,
    ) -> DataResult<P::Value> {
        let value = *value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        let wide = i64::try_from(value).map_err(|_| CodecError::OutOfRange {
            value: value.to_string(),
            target: "i64",
        })?;
        provider.merge(current, provider.create_integer(wide))
    }

    fn decode_start<P: TypeProvider>(&self, provider: &P, value: Option<&P::Value>) -> DataResult<T> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        let wide = provider.get_integer(value)?;
        T::try_from(wide).map_err(|_| CodecError::OutOfRange {
            value: wide.to_string(),
            target: type_name::<T>(),
        })
    }
}

impl<T> fmt::Display for IntegerCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer<{}>", type_name::<T>())
    }
}

/// Floating point types the [`FloatCodec`] can carry.
pub trait Float: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;

    /// `None` if a finite `value` does not fit.
    fn from_f64(value: f64) -> Option<Self>;
}

impl Float for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Option<Self> {
        let narrow = value as f32;
        if value.is_finite() && !narrow.is_finite() {
            None
        } else {
            Some(narrow)
        }
    }
}

impl Float for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Option<Self> {
        Some(value)
    }
}

pub struct FloatCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FloatCodec<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FloatCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FloatCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FloatCodec<T> {}

impl<T: Float> Codec for FloatCodec<T> {
    type Value = T;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&T>,
    ) -> DataResult<P::Value> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        provider.merge(current, provider.create_float(value.to_f64())?)
    }

    fn decode_start<P: TypeProvider>(&self, provider: &P, value: Option<&P::Value>) -> DataResult<T> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        let wide = provider.get_float(value)?;
        T::from_f64(wide).ok_or_else(|| CodecError::OutOfRange {
            value: format!("{wide:?}"),
            target: type_name::<T>(),
        })
    }
}

impl<T> fmt::Display for FloatCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Float<{}>", type_name::<T>())
    }
}

// ---------------------------------------------------------------------------
// Lifts
// ---------------------------------------------------------------------------

/// `Vec<C::Value>` as a list of independently encoded elements.
///
/// Stops at the first failing element and reports its index.
#[derive(Debug, Clone, Copy)]
pub struct ListCodec<C> {
    codec: C,
}

impl<C: Codec> ListCodec<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl<C: Codec> Codec for ListCodec<C> {
    type Value = Vec<C::Value>;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&Vec<C::Value>>,
    ) -> DataResult<P::Value> {
        let items = value.ok_or_else(|| CodecError::null_value(Operation::Encode, self))?;
        let encoded = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.codec
                    .encode_start(provider, provider.null(), Some(item))
                    .map_err(|e| CodecError::Element {
                        operation: Operation::Encode,
                        index,
                        source: Box::new(e),
                    })
            })
            .collect::<DataResult<Vec<_>>>()?;
        provider.merge(current, provider.create_list(encoded))
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<Vec<C::Value>> {
        let value = value.ok_or_else(|| CodecError::null_value(Operation::Decode, self))?;
        provider
            .get_list(value)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.codec
                    .decode_start(provider, Some(item))
                    .map_err(|e| CodecError::Element {
                        operation: Operation::Decode,
                        index,
                        source: Box::new(e),
                    })
            })
            .collect()
    }
}

impl<C: fmt::Display> fmt::Display for ListCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List[{}]", self.codec)
    }
}

/// `Option<C::Value>`: `None` encodes to nothing and absence decodes to
/// `None`.
///
/// Used as a field codec, a `None` leaves the key out of the map entirely
/// and a missing key is not an error.
#[derive(Debug, Clone, Copy)]
pub struct OptionalCodec<C> {
    codec: C,
}

impl<C: Codec> OptionalCodec<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }
}

impl<C: Codec> Codec for OptionalCodec<C> {
    type Value = Option<C::Value>;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&Option<C::Value>>,
    ) -> DataResult<P::Value> {
        match value {
            Some(Some(inner)) => self.codec.encode_start(provider, current, Some(inner)),
            _ => Ok(current),
        }
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<Option<C::Value>> {
        match value {
            Some(value) if !provider.is_null(value) => {
                self.codec.decode_start(provider, Some(value)).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn is_absent(&self, value: &Option<C::Value>) -> bool {
        value.is_none()
    }
}

impl<C: fmt::Display> fmt::Display for OptionalCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Optional[{}]", self.codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryProvider, Node};
    use crate::ErrorKind;

    // =====================================================================
    // Leaves
    // =====================================================================

    #[test]
    fn test_integer_encodes_into_null() {
        let codec = IntegerCodec::<i32>::new();
        assert_eq!(codec.encode(&MemoryProvider, &42), Ok(Node::Integer(42)));
    }

    #[test]
    fn test_integer_decode_out_of_range() {
        let codec = IntegerCodec::<u8>::new();
        let err = codec.decode(&MemoryProvider, &Node::Integer(300)).unwrap_err();
        assert_eq!(err.to_string(), "Value 300 is out of range for u8");
    }

    #[test]
    fn test_u64_above_i64_max_fails_to_encode() {
        let codec = IntegerCodec::<u64>::new();
        let err = codec.encode(&MemoryProvider, &u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_leaf_rejects_null_on_encode() {
        let err = StringCodec
            .encode_start(&MemoryProvider, Node::Null, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Unable to encode null value using 'String'");
    }

    #[test]
    fn test_leaf_rejects_null_on_decode() {
        let err = BoolCodec.decode_start(&MemoryProvider, None).unwrap_err();
        assert_eq!(err.to_string(), "Unable to decode null value using 'Bool'");
    }

    #[test]
    fn test_leaf_cannot_merge_into_a_map() {
        let err = IntegerCodec::<i32>::new()
            .encode_start(&MemoryProvider, MemoryProvider.create_map(), Some(&1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MergeFailure);
    }

    #[test]
    fn test_float_codec_f32() {
        let codec = FloatCodec::<f32>::new();
        let encoded = codec.encode(&MemoryProvider, &1.5).unwrap();
        assert_eq!(encoded, Node::Float(1.5));
        assert_eq!(codec.decode(&MemoryProvider, &encoded), Ok(1.5));
        assert_eq!(codec.to_string(), "Float<f32>");
    }

    #[test]
    fn test_f32_decode_out_of_range() {
        let codec = FloatCodec::<f32>::new();
        let err = codec.decode(&MemoryProvider, &Node::Float(1e300)).unwrap_err();
        assert_eq!(err.to_string(), "Value 1e300 is out of range for f32");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_f32_keeps_non_finite_input() {
        let codec = FloatCodec::<f32>::new();
        let decoded = codec.decode(&MemoryProvider, &Node::Float(f64::INFINITY));
        assert_eq!(decoded, Ok(f32::INFINITY));
    }

    #[test]
    fn test_f64_nan_survives_memory_backend() {
        let codec = FloatCodec::<f64>::new();
        let encoded = codec.encode(&MemoryProvider, &f64::NAN).unwrap();
        assert!(codec.decode(&MemoryProvider, &encoded).unwrap().is_nan());
    }

    // =====================================================================
    // Lists
    // =====================================================================

    #[test]
    fn test_list_round_trip() {
        let codec = ListCodec::new(StringCodec);
        let value = vec!["a".to_string(), "b".to_string()];
        let encoded = codec.encode(&MemoryProvider, &value).unwrap();
        assert_eq!(encoded, Node::List(vec![Node::from("a"), Node::from("b")]));
        assert_eq!(codec.decode(&MemoryProvider, &encoded), Ok(value));
    }

    #[test]
    fn test_list_reports_failing_index() {
        let codec = ListCodec::new(IntegerCodec::<i32>::new());
        let node = Node::List(vec![Node::Integer(1), Node::Bool(false)]);
        let err = codec.decode(&MemoryProvider, &node).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to decode element 1: Expected an integer but found Bool(false)"
        );
    }

    // =====================================================================
    // Optional
    // =====================================================================

    #[test]
    fn test_optional_none_leaves_current_untouched() {
        let codec = OptionalCodec::new(StringCodec);
        let current = MemoryProvider.create_map();
        let encoded = codec
            .encode_start(&MemoryProvider, current.clone(), Some(&None))
            .unwrap();
        assert_eq!(encoded, current);
    }

    #[test]
    fn test_only_optional_reports_absence() {
        let optional = OptionalCodec::new(StringCodec);
        assert!(optional.is_absent(&None));
        assert!(!optional.is_absent(&Some(String::new())));
        assert!(!StringCodec.is_absent(&String::new()));
    }

    #[test]
    fn test_optional_decodes_absence_and_null_as_none() {
        let codec = OptionalCodec::new(StringCodec);
        assert_eq!(codec.decode_start(&MemoryProvider, None), Ok(None));
        assert_eq!(codec.decode(&MemoryProvider, &Node::Null), Ok(None));
        assert_eq!(
            codec.decode(&MemoryProvider, &Node::from("x")),
            Ok(Some("x".to_string()))
        );
    }

    #[test]
    fn test_display_nests() {
        let codec = ListCodec::new(OptionalCodec::new(IntegerCodec::<i64>::new()));
        assert_eq!(codec.to_string(), "List[Optional[Integer<i64>]]");
    }
}
