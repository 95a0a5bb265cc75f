//! Integers: the `i[-]<digits>e` production, bounded to `i64`.

use crate::decoder::Decoder;
use crate::error::{BencodeError, Result};
use crate::stream::{put_decimal, ByteSink, ByteSource};

/// Decode one integer, returning it with the number of bytes consumed.
///
/// Accepts exactly the canonical spelling: no `-0`, no leading zeros, no
/// `+`. Values outside `i64` fail with `IntegerOverflow`.
pub fn decode<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<(i64, usize)> {
    let start = decoder.position();
    decoder.expect_token(b'i')?;

    let negative = decoder.peek()? == Some(b'-');
    if negative {
        decoder.next_byte()?;
    }

    let digits_at = decoder.position();
    // Accumulated as a negative number so that i64::MIN is representable.
    let mut acc: i64 = 0;
    let mut digits = 0usize;
    let mut leading_zero = false;

    loop {
        let offset = decoder.position();
        match decoder.next_byte()? {
            Some(b'e') => break,
            Some(b @ b'0'..=b'9') => {
                if leading_zero {
                    return Err(BencodeError::MalformedInteger {
                        offset: digits_at,
                        reason: "leading zero",
                    });
                }
                if digits == 0 && b == b'0' {
                    leading_zero = true;
                }
                acc = acc
                    .checked_mul(10)
                    .and_then(|n| n.checked_sub(i64::from(b - b'0')))
                    .ok_or(BencodeError::IntegerOverflow { offset: start })?;
                digits += 1;
            }
            Some(_) => {
                return Err(BencodeError::MalformedInteger {
                    offset,
                    reason: "unexpected character",
                })
            }
            None => return Err(BencodeError::TruncatedInput { offset }),
        }
    }

    if digits == 0 {
        return Err(BencodeError::MalformedInteger {
            offset: digits_at,
            reason: "no digits",
        });
    }
    if negative && leading_zero {
        return Err(BencodeError::MalformedInteger {
            offset: digits_at,
            reason: "negative zero",
        });
    }

    let value = if negative {
        acc
    } else {
        acc.checked_neg()
            .ok_or(BencodeError::IntegerOverflow { offset: start })?
    };
    Ok((value, decoder.position() - start))
}

/// Write `value` as `i<digits>e`.
pub fn encode<K: ByteSink>(value: i64, sink: &mut K) -> std::result::Result<(), K::Error> {
    sink.put(b"i")?;
    if value < 0 {
        sink.put(b"-")?;
    }
    put_decimal(value.unsigned_abs(), sink)?;
    sink.put(b"e")
}
