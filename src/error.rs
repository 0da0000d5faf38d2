//! Error types for decoding documents and looking up values.
//!
//! Decoding is all-or-nothing: the first problem found anywhere in the input
//! aborts the decode and is returned as one of the variants below. No partial
//! document is ever produced.
//!
//! ## Error Categories
//!
//! - **Decode errors**: [`Error::InvalidUtf8`] through [`Error::MixedArrayTypes`]
//! - **Lookup errors**: [`Error::PathNotFound`] and [`Error::TypeMismatch`], returned
//!   by the accessors on [`Document`](crate::Document). They only affect the one lookup.
//! - **Ambient errors**: [`Error::Io`] for file entry points, [`Error::Custom`] for
//!   failures reported by serde while deserializing into a typed value.
//!
//! ## Examples
//!
//! ```rust
//! use fiptoml::{parse_str, Error};
//!
//! let err = parse_str("port = 80\nport = 81\n").unwrap_err();
//! assert_eq!(err, Error::DuplicateKey("port".to_string()));
//! assert!(err.is_decode_error());
//! ```

use std::fmt;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    /// A key is not followed by `=`, or a header bracket is followed by a line end.
    #[error("invalid key name")]
    InvalidKeyName,

    /// A `[name]` or `[[name]]` header is malformed.
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    /// A key-value line starts with `=`.
    #[error("key name is empty")]
    EmptyKey,

    /// A key or table name is defined twice, or collides with a node of another kind.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The value assigned to this key is not one of the supported kinds.
    #[error("unsupported value for key: {0}")]
    UnsupportedValue(String),

    /// A token starting with `t` or `f` is neither `true` nor `false`.
    #[error("invalid boolean")]
    InvalidBool,

    /// A token is not an integer, float or datetime.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// A string is unterminated, spans lines illegally, or holds a bad escape.
    #[error("string syntax error")]
    StringSyntaxError,

    /// An array element does not have the kind of the first element.
    #[error("array elements must all have the same type")]
    MixedArrayTypes,

    /// A dotted path does not resolve to a value.
    #[error("path not found: {0:?}")]
    PathNotFound(String),

    /// A value exists but is not of the requested kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// IO error while reading or writing a file
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error from two type names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert_eq!(err.to_string(), "type mismatch: expected integer, found string");
    /// ```
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors produced while decoding text.
    ///
    /// Lookup, I/O and serde errors return `false`.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        !matches!(
            self,
            Error::PathNotFound(_) | Error::TypeMismatch { .. } | Error::Io(_) | Error::Custom(_)
        )
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::DuplicateKey("name".to_string()).to_string(),
            "duplicate key: name"
        );
        assert_eq!(
            Error::InvalidNumber("12x".to_string()).to_string(),
            "invalid number: \"12x\""
        );
        assert_eq!(
            Error::PathNotFound("owner.".to_string()).to_string(),
            "path not found: \"owner.\""
        );
    }

    #[test]
    fn test_decode_error_classification() {
        assert!(Error::InvalidUtf8.is_decode_error());
        assert!(Error::MixedArrayTypes.is_decode_error());
        assert!(!Error::PathNotFound("a".to_string()).is_decode_error());
        assert!(!Error::type_mismatch("bool", "string").is_decode_error());
        assert!(!Error::io("denied").is_decode_error());
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("missing field `name`");
        assert_eq!(err, Error::Custom("missing field `name`".to_string()));
    }
}
