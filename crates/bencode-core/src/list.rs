//! Lists: the `l<value>*e` production.

use crate::decoder::Decoder;
use crate::encoder::encode_any;
use crate::error::{BencodeError, Result};
use crate::stream::{ByteSink, ByteSource};
use crate::value::Value;

/// Decode one list, returning its elements in input order together with the
/// number of bytes consumed.
pub fn decode<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<(Vec<Value>, usize)> {
    let start = decoder.position();
    decoder.expect_token(b'l')?;

    let items = decoder.nested(start, |d| {
        let mut items = Vec::new();
        loop {
            match d.peek()? {
                Some(b'e') => {
                    d.next_byte()?;
                    return Ok(items);
                }
                Some(_) => items.push(d.decode_next()?),
                None => {
                    return Err(BencodeError::TruncatedInput {
                        offset: d.position(),
                    })
                }
            }
        }
    })?;

    Ok((items, decoder.position() - start))
}

/// Write `items` as `l...e`, in order.
pub fn encode<K: ByteSink>(items: &[Value], sink: &mut K) -> std::result::Result<(), K::Error> {
    sink.put(b"l")?;
    for item in items {
        encode_any(item, sink)?;
    }
    sink.put(b"e")
}
