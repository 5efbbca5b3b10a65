//! Error types for the codec layer.
//!
//! Codecs never throw. Every failure is a [`CodecError`] value travelling
//! back up through the combinators inside a [`DataResult`](crate::DataResult).
//! Each layer that adds structure (a grouped codec, a list codec) wraps the
//! inner error with its own context, so the final message reads like a path
//! from the outermost value down to the field that broke:
//!
//! ```text
//! Unable to decode component 'start: GroupedCodec[x: Integer<i32>, y: Integer<i32>]'
//!     of '{"start":{"x":1}}': missing field 'y'
//! ```

use std::fmt;

/// Which direction a codec was running in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Turning a Rust value into a representation value.
    Encode,
    /// Turning a representation value into a Rust value.
    Decode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// The coarse category of a [`CodecError`].
///
/// Callers building tooling (validation reports, fallbacks to defaults)
/// usually care about the kind, not the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An absent value where one was required.
    NullValue,
    /// The representation value does not have the expected shape.
    TypeMismatch,
    /// A required key is absent from a decoded map.
    MissingField,
    /// The backend could not combine two representation values.
    MergeFailure,
    /// A sub-codec failed; the inner error is wrapped with context.
    ComponentFailure,
    /// A free-form failure, usually raised by a mapping function.
    Custom,
}

/// Errors produced while encoding or decoding.
///
/// `Clone + PartialEq` so that whole results can be compared in tests and
/// cached next to the values they describe.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The value handed to a codec was absent.
    #[error("Unable to {operation} null value using '{codec}'")]
    NullValue {
        /// Direction that was attempted.
        operation: Operation,
        /// String form of the codec that rejected the value.
        codec: String,
    },

    /// The representation value has the wrong shape.
    #[error("Expected {expected} but found {found}")]
    TypeMismatch {
        /// Shape the codec needed ("a map", "an integer", ...).
        expected: &'static str,
        /// Debug form of the offending representation value.
        found: String,
    },

    /// A number decoded fine but does not fit the target type.
    #[error("Value {value} is out of range for {target}")]
    OutOfRange {
        /// The decoded number.
        value: String,
        /// Name of the Rust type it was meant for.
        target: &'static str,
    },

    /// A key was not present in a map.
    #[error("missing field '{key}'")]
    MissingField {
        /// The absent key.
        key: String,
    },

    /// The backend refused to merge two values.
    #[error("Unable to merge {current} with {addition}")]
    MergeFailure {
        /// Debug form of the value being merged into.
        current: String,
        /// Debug form of the value being added.
        addition: String,
    },

    /// A component of a grouped codec failed to encode.
    #[error("Unable to encode component of '{subject}' with '{codec}': {source}")]
    EncodeComponent {
        /// Debug form of the aggregate value.
        subject: String,
        /// String form of the failing component.
        codec: String,
        /// What went wrong inside the component.
        source: Box<CodecError>,
    },

    /// A component of a grouped codec failed to decode.
    #[error("Unable to decode component '{codec}' of '{subject}': {source}")]
    DecodeComponent {
        /// Debug form of the representation value.
        subject: String,
        /// String form of the failing component.
        codec: String,
        /// What went wrong inside the component.
        source: Box<CodecError>,
    },

    /// An element of a list failed.
    #[error("Unable to {operation} element {index}: {source}")]
    Element {
        /// Direction that was attempted.
        operation: Operation,
        /// Zero-based position in the list.
        index: usize,
        /// What went wrong for that element.
        source: Box<CodecError>,
    },

    /// A plain message, typically from a fallible mapping function.
    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    /// Creates a [`CodecError::Custom`] from any message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Shorthand for a [`CodecError::NullValue`] naming `codec`.
    pub fn null_value(operation: Operation, codec: &dyn fmt::Display) -> Self {
        Self::NullValue {
            operation,
            codec: codec.to_string(),
        }
    }

    /// Shorthand for a [`CodecError::TypeMismatch`].
    pub fn type_mismatch(expected: &'static str, found: &dyn fmt::Debug) -> Self {
        Self::TypeMismatch {
            expected,
            found: format!("{found:?}"),
        }
    }

    /// Shorthand for a [`CodecError::MergeFailure`].
    pub fn merge_failure(current: &dyn fmt::Debug, addition: &dyn fmt::Debug) -> Self {
        Self::MergeFailure {
            current: format!("{current:?}"),
            addition: format!("{addition:?}"),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullValue { .. } => ErrorKind::NullValue,
            Self::TypeMismatch { .. } | Self::OutOfRange { .. } => ErrorKind::TypeMismatch,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::MergeFailure { .. } => ErrorKind::MergeFailure,
            Self::EncodeComponent { .. } | Self::DecodeComponent { .. } | Self::Element { .. } => {
                ErrorKind::ComponentFailure
            }
            Self::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Follows wrapped component errors down to the innermost one.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            Self::EncodeComponent { source, .. }
            | Self::DecodeComponent { source, .. }
            | Self::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the full chained message.
    ///
    /// Same as `to_string()`; exists so call sites read like the
    /// `Success`/`Error` vocabulary used throughout the crate.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = CodecError::MissingField { key: "y".into() };
        assert_eq!(err.to_string(), "missing field 'y'");
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_null_value_names_codec_and_operation() {
        let err = CodecError::null_value(Operation::Decode, &"Integer<i32>");
        assert_eq!(
            err.to_string(),
            "Unable to decode null value using 'Integer<i32>'"
        );
    }

    #[test]
    fn test_component_message_chains_inner_message() {
        let err = CodecError::EncodeComponent {
            subject: "Point { x: 3, y: 4 }".into(),
            codec: "y: Integer<u8>".into(),
            source: Box::new(CodecError::custom("boom")),
        };
        assert_eq!(
            err.to_string(),
            "Unable to encode component of 'Point { x: 3, y: 4 }' with 'y: Integer<u8>': boom"
        );
        assert_eq!(err.kind(), ErrorKind::ComponentFailure);
    }

    #[test]
    fn test_root_cause_unwraps_nested_components() {
        let inner = CodecError::MissingField { key: "x".into() };
        let err = CodecError::DecodeComponent {
            subject: "outer".into(),
            codec: "a".into(),
            source: Box::new(CodecError::Element {
                operation: Operation::Decode,
                index: 2,
                source: Box::new(inner.clone()),
            }),
        };
        assert_eq!(err.root_cause(), &inner);
    }

    #[test]
    fn test_out_of_range_is_a_type_mismatch() {
        let err = CodecError::OutOfRange {
            value: "300".into(),
            target: "u8",
        };
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "Value 300 is out of range for u8");
    }
}
