//! Dictionaries: the `d(<bytestring><value>)*e` production.
//!
//! # Key order
//!
//! In memory a [`Dictionary`] keeps pairs in insertion (or decode) order. On
//! the wire, keys are always written in ascending raw-byte order, using
//! [`canonical_key_order`], so two logically equal dictionaries encode to the
//! same bytes (a torrent's info-hash is the SHA-1 of the encoded `info`
//! dictionary).
//!
//! Decoding is permissive: out-of-order and duplicate keys are kept and
//! reported as [`KeyViolation`]s. With `DecodeOptions::strict` the first
//! violation fails the decode instead.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::bytestring::{self, ByteString};
use crate::decoder::Decoder;
use crate::encoder::encode_any;
use crate::error::{BencodeError, Result};
use crate::stream::{ByteSink, ByteSource};
use crate::value::Value;

/// Ordered key→value pairs with byte-string keys.
///
/// Equality is logical: two dictionaries are equal when they hold the same
/// pairs, whatever order they were inserted in.
#[derive(Clone, Default)]
pub struct Dictionary {
    entries: Vec<(ByteString, Value)>,
    /// Position of the first entry for each key.
    index: HashMap<ByteString, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a pair, returning the previous value if the key was present.
    /// A replaced value keeps its original position.
    pub fn insert(&mut self, key: impl Into<ByteString>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index.get(key.as_bytes()).copied() {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// The value for `key`. With duplicate keys from a permissive decode,
    /// the first occurrence wins.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        self.index.get(key).map(|&pos| &mut self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    /// Remove every pair with `key`, returning the first removed value.
    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        let first = self.index.remove(key)?;
        let (_, value) = self.entries.remove(first);
        self.entries.retain(|(k, _)| k.as_bytes() != key);
        self.reindex();
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion/decode order.
    pub fn iter(&self) -> impl Iterator<Item = (&ByteString, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ByteString> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Pairs in the order they are written on the wire.
    pub fn canonical_iter(&self) -> impl Iterator<Item = (&ByteString, &Value)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| canonical_key_order(a.0, b.0));
        sorted.into_iter()
    }

    /// True when the in-memory order already is the wire order and no key
    /// repeats.
    pub fn is_canonical(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| canonical_key_order(&w[0].0, &w[1].0) == Ordering::Less)
    }

    /// Append without the uniqueness check; used by the permissive decoder.
    pub(crate) fn push_decoded(&mut self, key: ByteString, value: Value) {
        let pos = self.entries.len();
        self.index.entry(key.clone()).or_insert(pos);
        self.entries.push((key, value));
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (pos, (key, _)) in self.entries.iter().enumerate() {
            self.index.entry(key.clone()).or_insert(pos);
        }
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.canonical_iter().eq(other.canonical_iter())
    }
}

impl Eq for Dictionary {}

impl<K: Into<ByteString>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

impl IntoIterator for Dictionary {
    type Item = (ByteString, Value);
    type IntoIter = std::vec::IntoIter<(ByteString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The wire ordering of dictionary keys: ascending by raw bytes, with a
/// key sorting before any longer key it is a prefix of.
pub fn canonical_key_order(a: &ByteString, b: &ByteString) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// How a decoded key broke canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyViolationKind {
    /// The key already appeared earlier in the same dictionary.
    Duplicate,
    /// The key sorts before the key preceding it.
    Unsorted,
}

/// A non-canonical key seen by a permissive decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyViolation {
    /// Offset of the key's length prefix.
    pub offset: usize,
    pub key: ByteString,
    pub kind: KeyViolationKind,
}

/// Decode one dictionary, returning it with the number of bytes consumed.
pub fn decode<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<(Dictionary, usize)> {
    let start = decoder.position();
    decoder.expect_token(b'd')?;

    let dict = decoder.nested(start, |d| {
        let mut dict = Dictionary::new();

        loop {
            let key_offset = d.position();
            match d.peek()? {
                Some(b'e') => {
                    d.next_byte()?;
                    return Ok(dict);
                }
                Some(_) => {
                    let (key, _) = bytestring::decode(d)?;
                    if let Some(kind) = check_key(&dict, &key) {
                        d.report_key_violation(KeyViolation {
                            offset: key_offset,
                            key: key.clone(),
                            kind,
                        })?;
                    }
                    let value = d.decode_next()?;
                    dict.push_decoded(key, value);
                }
                None => {
                    return Err(BencodeError::TruncatedInput {
                        offset: d.position(),
                    })
                }
            }
        }
    })?;

    Ok((dict, decoder.position() - start))
}

fn check_key(dict: &Dictionary, key: &ByteString) -> Option<KeyViolationKind> {
    let previous = dict.entries.last().map(|(k, _)| k)?;
    if dict.contains_key(key.as_bytes()) {
        return Some(KeyViolationKind::Duplicate);
    }
    match canonical_key_order(previous, key) {
        Ordering::Greater => Some(KeyViolationKind::Unsorted),
        _ => None,
    }
}

/// Write `dict` as `d...e` with keys in canonical order.
pub fn encode<K: ByteSink>(dict: &Dictionary, sink: &mut K) -> std::result::Result<(), K::Error> {
    sink.put(b"d")?;
    for (key, value) in dict.canonical_iter() {
        bytestring::encode(key, sink)?;
        encode_any(value, sink)?;
    }
    sink.put(b"e")
}
