//! Result-preserving transforms and the codecs derived through them.

use std::fmt;
use std::sync::Arc;

use crate::{Codec, CodecError, DataResult, TypeProvider};

/// A `DataResult<T> -> DataResult<R>` transform.
///
/// Lets a derived codec ("an int codec, mapped through an int → enum
/// parser") reuse the error handling of the codec it wraps: an incoming
/// error always passes through untouched, only successes are transformed.
pub struct ResultMappingFunction<T, R> {
    function: Arc<dyn Fn(DataResult<T>) -> DataResult<R> + Send + Sync>,
}

impl<T: 'static, R: 'static> ResultMappingFunction<T, R> {
    /// Wraps an arbitrary result transform.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(DataResult<T>) -> DataResult<R> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
        }
    }

    /// Lifts a total function over the success value.
    pub fn direct<F>(function: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self::new(move |result| result.map(&function))
    }

    /// Lifts a fallible function. Its error is turned into a
    /// [`CodecError::Custom`] carrying the error's message.
    pub fn throwable<F, E>(function: F) -> Self
    where
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self::new(move |result| {
            let value = result?;
            function(value).map_err(|e| CodecError::custom(e.to_string()))
        })
    }
}

impl<T, R> ResultMappingFunction<T, R> {
    pub fn apply(&self, input: DataResult<T>) -> DataResult<R> {
        (self.function)(input)
    }
}

impl<T, R> Clone for ResultMappingFunction<T, R> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<T, R> fmt::Debug for ResultMappingFunction<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultMappingFunction").finish_non_exhaustive()
    }
}

/// A codec for `T` built from a codec for `C::Value` and two mapping
/// functions. Created by [`Codec::map_result`], [`Codec::xmap`] and
/// [`Codec::flat_xmap`].
pub struct MappedCodec<C: Codec, T> {
    codec: C,
    decode: ResultMappingFunction<C::Value, T>,
    encode: ResultMappingFunction<T, C::Value>,
}

impl<C: Codec, T> MappedCodec<C, T> {
    pub fn new(
        codec: C,
        decode: ResultMappingFunction<C::Value, T>,
        encode: ResultMappingFunction<T, C::Value>,
    ) -> Self {
        Self {
            codec,
            decode,
            encode,
        }
    }
}

impl<C: Codec, T: Clone> Codec for MappedCodec<C, T> {
    type Value = T;

    fn encode_start<P: TypeProvider>(
        &self,
        provider: &P,
        current: P::Value,
        value: Option<&T>,
    ) -> DataResult<P::Value> {
        match value {
            None => self.codec.encode_start(provider, current, None),
            Some(value) => {
                let inner = self.encode.apply(Ok(value.clone()))?;
                self.codec.encode_start(provider, current, Some(&inner))
            }
        }
    }

    fn decode_start<P: TypeProvider>(
        &self,
        provider: &P,
        value: Option<&P::Value>,
    ) -> DataResult<T> {
        self.decode.apply(self.codec.decode_start(provider, value))
    }
}

impl<C: Codec, T> fmt::Display for MappedCodec<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mapped[{}]", self.codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs;
    use crate::memory::{MemoryProvider, Node};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    fn parse_color(id: i32) -> Result<Color, String> {
        match id {
            0 => Ok(Color::Red),
            1 => Ok(Color::Green),
            other => Err(format!("Unknown color id {other}")),
        }
    }

    // =====================================================================
    // ResultMappingFunction
    // =====================================================================

    #[test]
    fn test_direct_maps_success() {
        let f = ResultMappingFunction::direct(|v: i32| v + 1);
        assert_eq!(f.apply(Ok(1)), Ok(2));
    }

    #[test]
    fn test_direct_passes_error_through() {
        let f = ResultMappingFunction::direct(|v: i32| v + 1);
        assert_eq!(
            f.apply(Err(CodecError::custom("upstream"))),
            Err(CodecError::custom("upstream"))
        );
    }

    #[test]
    fn test_throwable_converts_failure_to_error() {
        let f = ResultMappingFunction::throwable(parse_color);
        assert_eq!(f.apply(Ok(1)), Ok(Color::Green));
        assert_eq!(
            f.apply(Ok(7)),
            Err(CodecError::custom("Unknown color id 7"))
        );
    }

    #[test]
    fn test_throwable_does_not_call_function_on_error() {
        let f = ResultMappingFunction::throwable(|_: i32| -> Result<i32, String> {
            panic!("must not be called")
        });
        assert!(f.apply(Err(CodecError::custom("first"))).is_err());
    }

    // =====================================================================
    // MappedCodec
    // =====================================================================

    #[test]
    fn test_flat_xmap_enum_codec_round_trip() {
        let codec = codecs::int().flat_xmap(parse_color, |c: Color| Ok::<_, String>(c as i32));
        let encoded = codec.encode(&MemoryProvider, &Color::Green).unwrap();
        assert_eq!(encoded, Node::Integer(1));
        assert_eq!(codec.decode(&MemoryProvider, &encoded), Ok(Color::Green));
    }

    #[test]
    fn test_flat_xmap_reports_parser_message() {
        let codec = codecs::int().flat_xmap(parse_color, |c: Color| Ok::<_, String>(c as i32));
        let err = codec.decode(&MemoryProvider, &Node::Integer(9)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown color id 9");
    }

    #[test]
    fn test_mapped_codec_keeps_inner_decode_error() {
        let codec = codecs::int().xmap(|v| v * 2, |v| v / 2);
        let err = codec
            .decode(&MemoryProvider, &Node::String("x".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected an integer but found String(\"x\")");
    }

    #[test]
    fn test_mapped_codec_display_wraps_inner() {
        let codec = codecs::string().xmap(|s| s.len(), |n| "x".repeat(n));
        assert_eq!(codec.to_string(), "Mapped[String]");
    }
}
