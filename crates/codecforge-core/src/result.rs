//! The error-as-value container every codec operation returns.
//!
//! [`DataResult`] is a plain `Result<T, CodecError>`. `Ok` plays the role of
//! "success" and `Err` of "error", so `map`, `and_then` and `is_err` come for
//! free from the standard library. [`DataResultExt`] adds the two explicit
//! force-unwraps codec tooling reaches for.

use crate::CodecError;

/// Result of an encode or decode step.
pub type DataResult<T> = Result<T, CodecError>;

/// Extra operations on [`DataResult`].
pub trait DataResultExt<T> {
    /// Returns the success value.
    ///
    /// # Panics
    /// Panics with the full chained error message if this is an error.
    fn or_throw(self) -> T;

    /// Returns the error.
    ///
    /// # Panics
    /// Panics if this is a success.
    fn error_or_throw(self) -> CodecError;

    /// Returns `true` if this is an error.
    fn is_error(&self) -> bool;
}

impl<T> DataResultExt<T> for DataResult<T> {
    fn or_throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    fn error_or_throw(self) -> CodecError {
        match self {
            Ok(_) => panic!("result is a success, not an error"),
            Err(error) => error,
        }
    }

    fn is_error(&self) -> bool {
        self.is_err()
    }
}
