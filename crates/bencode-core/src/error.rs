//! Error types for Bencode decoding and encoding.

use thiserror::Error;

/// Errors that can occur while decoding or encoding Bencode.
///
/// Every decode error carries the byte offset (from the start of the input)
/// at which the problem was detected, which makes failures inside deeply
/// nested documents traceable.
#[derive(Error, Debug)]
pub enum BencodeError {
    /// A byte string length prefix was empty, contained a non-digit, or was
    /// not terminated by `:`.
    #[error("malformed string length at byte {offset}")]
    MalformedLength { offset: usize },

    /// An integer token violated the `i[-]<digits>e` grammar.
    #[error("malformed integer at byte {offset}: {reason}")]
    MalformedInteger { offset: usize, reason: &'static str },

    /// An integer token does not fit in an `i64`.
    #[error("integer at byte {offset} does not fit in 64 bits")]
    IntegerOverflow { offset: usize },

    /// The input ended before the current value was complete.
    #[error("input truncated at byte {offset}")]
    TruncatedInput { offset: usize },

    /// The leading byte of a value is not `i`, `l`, `d` or a digit.
    #[error("unknown token {byte:#04x} at byte {offset}")]
    UnknownTokenType { offset: usize, byte: u8 },

    /// A byte string declared a length above the configured maximum.
    #[error("string length at byte {offset} exceeds limit of {limit} bytes")]
    SizeLimitExceeded { offset: usize, limit: usize },

    /// Strict mode only: a dictionary key repeated or broke ascending order.
    #[error("dictionary key at byte {offset} is duplicated or out of order")]
    DuplicateOrUnsortedKey { offset: usize },

    /// Lists and dictionaries were nested deeper than the configured maximum.
    #[error("nesting deeper than {limit} levels at byte {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    /// A complete value was decoded but more input followed it.
    #[error("trailing data after value at byte {offset}")]
    TrailingData { offset: usize },

    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless mirror of [`BencodeError`] for matching on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedLength,
    MalformedInteger,
    IntegerOverflow,
    TruncatedInput,
    UnknownTokenType,
    SizeLimitExceeded,
    DuplicateOrUnsortedKey,
    NestingTooDeep,
    TrailingData,
    Io,
}

impl BencodeError {
    /// The class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BencodeError::MalformedLength { .. } => ErrorKind::MalformedLength,
            BencodeError::MalformedInteger { .. } => ErrorKind::MalformedInteger,
            BencodeError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
            BencodeError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            BencodeError::UnknownTokenType { .. } => ErrorKind::UnknownTokenType,
            BencodeError::SizeLimitExceeded { .. } => ErrorKind::SizeLimitExceeded,
            BencodeError::DuplicateOrUnsortedKey { .. } => ErrorKind::DuplicateOrUnsortedKey,
            BencodeError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            BencodeError::TrailingData { .. } => ErrorKind::TrailingData,
            BencodeError::Io(_) => ErrorKind::Io,
        }
    }

    /// Byte offset at which the error was detected. `None` for I/O errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            BencodeError::MalformedLength { offset }
            | BencodeError::MalformedInteger { offset, .. }
            | BencodeError::IntegerOverflow { offset }
            | BencodeError::TruncatedInput { offset }
            | BencodeError::UnknownTokenType { offset, .. }
            | BencodeError::SizeLimitExceeded { offset, .. }
            | BencodeError::DuplicateOrUnsortedKey { offset }
            | BencodeError::NestingTooDeep { offset, .. }
            | BencodeError::TrailingData { offset } => Some(*offset),
            BencodeError::Io(_) => None,
        }
    }
}

/// Convenience alias used throughout bencode-core.
pub type Result<T> = std::result::Result<T, BencodeError>;
