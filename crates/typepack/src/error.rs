//! Encode and decode error types.

use thiserror::Error;
use typepack_buffers::BufferError;

/// A value rejected by a Type's `write`. Every variant names the logical
/// location of the offending value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("value out of range for {type_name} at '{path}'")]
    OutOfRange {
        path: String,
        type_name: &'static str,
    },
    #[error("invalid color {input:?} at '{path}'")]
    InvalidColor { path: String, input: String },
    #[error("invalid object id {input:?} at '{path}'")]
    InvalidObjectId { path: String, input: String },
    #[error("invalid regex flags {flags:?} at '{path}'")]
    InvalidRegexFlags { path: String, flags: String },
    #[error("date out of range at '{path}'")]
    InvalidDate { path: String },
    #[error("JSON nesting exceeds {limit} levels at '{path}'")]
    NestingTooDeep { path: String, limit: usize },
}

impl EncodeError {
    /// Rendered path of the value that failed validation.
    pub fn path(&self) -> &str {
        match self {
            EncodeError::TypeMismatch { path, .. }
            | EncodeError::OutOfRange { path, .. }
            | EncodeError::InvalidColor { path, .. }
            | EncodeError::InvalidObjectId { path, .. }
            | EncodeError::InvalidRegexFlags { path, .. }
            | EncodeError::InvalidDate { path }
            | EncodeError::NestingTooDeep { path, .. } => path,
        }
    }
}

/// Malformed or truncated input met by a Type's `read`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    Underflow { needed: usize, remaining: usize },
    #[error("malformed variable-length integer")]
    MalformedVarint,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid boolean byte: 0x{0:02x}")]
    InvalidBoolean(u8),
    #[error("unknown JSON tag: 0x{0:02x}")]
    UnknownTag(u8),
    #[error("non-finite JSON number")]
    NonFiniteNumber,
    #[error("duplicate JSON object key: {0:?}")]
    DuplicateKey(String),
    #[error("JSON nesting exceeds {0} levels")]
    NestingTooDeep(usize),
    #[error("date out of range: {0} ms")]
    InvalidDate(i64),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { needed, remaining } => {
                DecodeError::Underflow { needed, remaining }
            }
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8,
        }
    }
}

/// Name not in the Type registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown type name: {0:?}")]
pub struct UnknownTypeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_errors_map_to_decode_errors() {
        let err: DecodeError = BufferError::EndOfBuffer {
            needed: 3,
            remaining: 1,
        }
        .into();
        assert_eq!(
            err,
            DecodeError::Underflow {
                needed: 3,
                remaining: 1
            }
        );
        assert_eq!(
            DecodeError::from(BufferError::InvalidUtf8),
            DecodeError::InvalidUtf8
        );
    }

    #[test]
    fn mismatch_message_names_both_kinds() {
        let err = EncodeError::TypeMismatch {
            path: "age".to_string(),
            expected: "unsigned integer",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "expected unsigned integer at 'age', found string"
        );
    }

    #[test]
    fn encode_error_messages_carry_path() {
        let err = EncodeError::InvalidColor {
            path: "theme.background".to_string(),
            input: "#zz0011".to_string(),
        };
        assert_eq!(err.path(), "theme.background");
        assert_eq!(
            err.to_string(),
            "invalid color \"#zz0011\" at 'theme.background'"
        );
    }
}
