//! Decoding: the value dispatcher and the document-level entry points.
//!
//! A [`Decoder`] wraps a [`ByteSource`] together with the active
//! [`DecodeOptions`], the current nesting depth, and the key-order violations
//! seen so far. [`Decoder::decode_next`] is the single recursive hook: it
//! peeks one byte and hands off to the codec for that production, and the
//! list and dictionary codecs call back into it for their children.
//!
//! Any error ends the decode. The decoder is not meant to be reused after a
//! failure.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::dictionary::{self, KeyViolation};
use crate::error::{BencodeError, Result};
use crate::options::DecodeOptions;
use crate::stream::{ByteSource, ReaderSource, SliceSource};
use crate::value::Value;
use crate::{bytestring, integer, list};

/// Stateful cursor for decoding Bencode from a [`ByteSource`].
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    options: DecodeOptions,
    depth: usize,
    violations: Vec<KeyViolation>,
}

impl<'a> Decoder<SliceSource<'a>> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(SliceSource::new(data))
    }
}

impl<R: BufRead> Decoder<ReaderSource<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }
}

impl<S: ByteSource> Decoder<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, DecodeOptions::default())
    }

    pub fn with_options(source: S, options: DecodeOptions) -> Self {
        Self {
            source,
            options,
            depth: 0,
            violations: Vec::new(),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Key-order violations recorded by permissive dictionary decoding.
    pub fn key_violations(&self) -> &[KeyViolation] {
        &self.violations
    }

    pub fn take_key_violations(&mut self) -> Vec<KeyViolation> {
        std::mem::take(&mut self.violations)
    }

    /// True when the source has no more bytes.
    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.source.peek()?.is_none())
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Decode the next value, dispatching on its leading byte.
    pub fn decode_next(&mut self) -> Result<Value> {
        let offset = self.position();
        match self.peek()? {
            Some(b'i') => integer::decode(self).map(|(i, _)| Value::Integer(i)),
            Some(b'l') => list::decode(self).map(|(l, _)| Value::List(l)),
            Some(b'd') => dictionary::decode(self).map(|(d, _)| Value::Dict(d)),
            Some(b'0'..=b'9') => bytestring::decode(self).map(|(b, _)| Value::Bytes(b)),
            Some(byte) => Err(BencodeError::UnknownTokenType { offset, byte }),
            None => Err(BencodeError::TruncatedInput { offset }),
        }
    }

    pub(crate) fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.source.peek()?)
    }

    pub(crate) fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.source.next_byte()?)
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.source.read_bytes(len)?)
    }

    pub(crate) fn remaining(&self) -> Option<usize> {
        self.source.remaining()
    }

    /// Consume the leading byte of a production, which must be `token`.
    pub(crate) fn expect_token(&mut self, token: u8) -> Result<()> {
        let offset = self.position();
        match self.next_byte()? {
            Some(b) if b == token => Ok(()),
            Some(byte) => Err(BencodeError::UnknownTokenType { offset, byte }),
            None => Err(BencodeError::TruncatedInput { offset }),
        }
    }

    /// Run `body` one container level deeper, enforcing `max_depth`.
    pub(crate) fn nested<T>(
        &mut self,
        offset: usize,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let limit = self.options.max_depth;
        if self.depth >= limit {
            trace!(offset, limit, "nesting limit reached");
            return Err(BencodeError::NestingTooDeep { offset, limit });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    /// Fail in strict mode, otherwise remember the violation.
    pub(crate) fn report_key_violation(&mut self, violation: KeyViolation) -> Result<()> {
        if self.options.strict {
            return Err(BencodeError::DuplicateOrUnsortedKey {
                offset: violation.offset,
            });
        }
        debug!(
            offset = violation.offset,
            kind = ?violation.kind,
            "non-canonical dictionary key"
        );
        self.violations.push(violation);
        Ok(())
    }
}

/// The outcome of a decode with options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub value: Value,
    /// Bytes consumed by the value.
    pub consumed: usize,
    /// Non-canonical keys, in input order. Always empty in strict mode.
    pub key_violations: Vec<KeyViolation>,
}

/// Decode a complete document with default options.
///
/// The input must hold exactly one value; anything after it fails with
/// `TrailingData`.
///
/// ```
/// use bencode_core::decode;
///
/// let value = decode(b"l4:spam4:eggse").unwrap();
/// let items = value.as_list().unwrap();
/// assert_eq!(items[0].as_str(), Some("spam"));
/// assert_eq!(items[1].as_str(), Some("eggs"));
/// ```
pub fn decode(data: &[u8]) -> Result<Value> {
    decode_with(data, &DecodeOptions::default()).map(|d| d.value)
}

/// Decode the value at the start of `data`, ignoring whatever follows.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize)> {
    let mut decoder = Decoder::from_slice(data);
    let value = decoder.decode_next()?;
    Ok((value, decoder.position()))
}

/// Decode a complete document with explicit options.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    let mut decoder = Decoder::with_options(SliceSource::new(data), options.clone());
    let value = decoder.decode_next()?;
    let consumed = decoder.position();
    if consumed != data.len() {
        return Err(BencodeError::TrailingData { offset: consumed });
    }
    Ok(Decoded {
        value,
        consumed,
        key_violations: decoder.take_key_violations(),
    })
}

/// Decode one value from a buffered reader.
///
/// Reading stops right after the value, so several documents can be pulled
/// from one stream by calling this repeatedly.
pub fn decode_reader<R: BufRead>(reader: R, options: &DecodeOptions) -> Result<Decoded> {
    let mut decoder = Decoder::with_options(ReaderSource::new(reader), options.clone());
    let value = decoder.decode_next()?;
    Ok(Decoded {
        value,
        consumed: decoder.position(),
        key_violations: decoder.take_key_violations(),
    })
}
