//! Encoding: dispatch from a [`Value`] to the codec for its kind.
//!
//! Output is always canonical: integers without leading zeros and
//! dictionaries with keys in ascending byte order.

use std::io::Write;

use crate::error::Result;
use crate::stream::{ByteSink, WriterSink};
use crate::value::Value;
use crate::{bytestring, dictionary, integer, list};

/// Encode a value into a new buffer. Cannot fail.
///
/// ```
/// use bencode_core::{encode, Value};
///
/// let list = Value::List(vec![Value::string("spam"), Value::Integer(-42)]);
/// assert_eq!(encode(&list), b"l4:spami-42ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let Ok(()) = encode_any(value, &mut out);
    out
}

/// Encode a value into any writer. Only the writer's own errors surface.
pub fn encode_to<W: Write>(value: &Value, writer: W) -> Result<()> {
    encode_any(value, &mut WriterSink(writer))?;
    Ok(())
}

/// Write `value` to `sink` through the codec matching its kind.
pub fn encode_any<K: ByteSink>(value: &Value, sink: &mut K) -> std::result::Result<(), K::Error> {
    match value {
        Value::Bytes(b) => bytestring::encode(b, sink),
        Value::Integer(i) => integer::encode(*i, sink),
        Value::List(items) => list::encode(items, sink),
        Value::Dict(dict) => dictionary::encode(dict, sink),
    }
}
