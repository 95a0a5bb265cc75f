//! Byte strings: the `<len>:<bytes>` production.
//!
//! A [`ByteString`] is raw bytes, not text. Bencode never says what encoding
//! a string uses, and torrent files routinely carry binary data (piece
//! hashes, compact peer lists) in the same type as human-readable names.
//! Text views are offered as explicit, lossy projections only.

use std::borrow::Borrow;

use bytes::Bytes;
use tracing::trace;

use crate::decoder::Decoder;
use crate::error::{BencodeError, Result};
use crate::stream::{put_decimal, ByteSink, ByteSource};
use crate::text;

/// An immutable Bencode byte string.
///
/// Equality and hashing are over the raw bytes. No `Ord`: key ordering
/// belongs to the dictionary encoder alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteString(Bytes);

impl ByteString {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// The UTF-8 bytes of `s`.
    pub fn from_text(s: &str) -> Self {
        Self(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Encode `s` one byte per character (ISO-8859-1).
    ///
    /// Returns `None` if `s` contains a character above `U+00FF`.
    pub fn from_latin1(s: &str) -> Option<Self> {
        text::latin1_encode(s).map(|b| Self(Bytes::from(b)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bytes as UTF-8 text, if they are valid UTF-8.
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Project every byte onto the Latin-1 code point of the same value.
    ///
    /// Never fails and is reversible through [`ByteString::from_latin1`], but
    /// the result is only meaningful text when the bytes really are Latin-1.
    pub fn to_latin1(&self) -> String {
        text::latin1_decode(&self.0)
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// `Bytes` hashes as its slice, so map lookups by `&[u8]` agree.
impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for ByteString {
    fn from(b: Bytes) -> Self {
        Self(b)
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

impl From<&[u8]> for ByteString {
    fn from(s: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(s))
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(s: &[u8; N]) -> Self {
        Self(Bytes::copy_from_slice(s))
    }
}

/// Decode one byte string, returning it with the number of bytes consumed.
pub fn decode<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<(ByteString, usize)> {
    let start = decoder.position();
    let len = read_length(decoder)?;

    if let Some(remaining) = decoder.remaining() {
        if len > remaining {
            return Err(BencodeError::TruncatedInput {
                offset: decoder.position() + remaining,
            });
        }
    }

    let bytes = decoder.read_bytes(len)?;
    if bytes.len() < len {
        return Err(BencodeError::TruncatedInput {
            offset: decoder.position(),
        });
    }

    Ok((ByteString::from(bytes), decoder.position() - start))
}

/// Parse the decimal length prefix up to and including `:`.
///
/// The limit is checked digit by digit, so neither an absurd length nor an
/// endless run of digits is ever materialised.
fn read_length<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<usize> {
    let start = decoder.position();
    let limit = decoder.options().max_string_len;
    let mut len: usize = 0;
    let mut digits = 0usize;

    loop {
        let offset = decoder.position();
        match decoder.next_byte()? {
            Some(b':') if digits > 0 => return Ok(len),
            Some(b @ b'0'..=b'9') => {
                len = len
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(usize::from(b - b'0')))
                    .filter(|n| *n <= limit)
                    .ok_or_else(|| {
                        trace!(offset = start, limit, "string length over limit");
                        BencodeError::SizeLimitExceeded {
                            offset: start,
                            limit,
                        }
                    })?;
                digits += 1;
            }
            Some(_) | None => return Err(BencodeError::MalformedLength { offset }),
        }
    }
}

/// Write `value` as `<len>:<bytes>`.
pub fn encode<K: ByteSink>(value: &ByteString, sink: &mut K) -> std::result::Result<(), K::Error> {
    put_decimal(value.len() as u64, sink)?;
    sink.put(b":")?;
    sink.put(value.as_bytes())
}
