//! Lossy text projections of byte strings and whole documents.
//!
//! Bencode only guarantees bytes. Everything here is for display and
//! debugging; none of it is used by the codec itself.
//!
//! The single-byte codepage is ISO-8859-1 (Latin-1): byte `0xNN` maps to code
//! point `U+00NN`. It is the one single-byte mapping that is total in both
//! directions for the first 256 code points, so a Latin-1 projection can
//! always be turned back into the original bytes.

use serde_json::{Map, Number};

use crate::bytestring::ByteString;
use crate::value::Value;

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub(crate) fn latin1_encode(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(c).ok()).collect()
}

/// UTF-8 when valid, Latin-1 otherwise.
fn display_text(b: &ByteString) -> String {
    match b.as_utf8() {
        Some(s) => s.to_owned(),
        None => b.to_latin1(),
    }
}

impl Value {
    /// Project this value onto JSON for display.
    ///
    /// Byte strings become JSON strings (UTF-8 if valid, Latin-1 otherwise),
    /// integers become numbers, and dictionaries become objects with keys in
    /// canonical order. With duplicate keys the first occurrence wins, as in
    /// [`Dictionary::get`](crate::Dictionary::get). The projection is not
    /// reversible: binary strings and text are indistinguishable in the
    /// output.
    ///
    /// ```
    /// use bencode_core::decode;
    ///
    /// let value = decode(b"d3:cow3:moo4:spaml1:ai1eee").unwrap();
    /// assert_eq!(value.to_json().to_string(), r#"{"cow":"moo","spam":["a",1]}"#);
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bytes(b) => serde_json::Value::String(display_text(b)),
            Value::Integer(i) => serde_json::Value::Number(Number::from(*i)),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Dict(dict) => {
                let mut map = Map::new();
                for (key, value) in dict.canonical_iter() {
                    map.entry(display_text(key)).or_insert_with(|| value.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
