//! Byte-level collaborators: where decoded bytes come from and where encoded
//! bytes go.
//!
//! The codec never touches files or sockets itself. It consumes a
//! [`ByteSource`] and produces into a [`ByteSink`]; both are implemented here
//! for the common cases (in-memory slices, any `BufRead`, any `Write`, and
//! `Vec<u8>`).

use std::convert::Infallible;
use std::io::{self, BufRead, Read, Write};

/// A sequential byte source with one byte of lookahead.
pub trait ByteSource {
    /// Look at the next byte without consuming it. `None` at end of input.
    fn peek(&mut self) -> io::Result<Option<u8>>;

    /// Consume and return the next byte. `None` at end of input.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;

    /// Read up to `len` bytes. Returns fewer only when the input ends first.
    fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Bytes left in the input, when the source knows it.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

/// A [`ByteSource`] over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.data.get(self.pos).copied())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let end = self.pos.saturating_add(len).min(self.data.len());
        let bytes = self.data[self.pos..end].to_vec();
        self.pos = end;
        Ok(bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.data.len() - self.pos)
    }
}

/// A [`ByteSource`] over any buffered reader.
///
/// String payloads are read incrementally, so a hostile length prefix can
/// only cost as much memory as the reader actually delivers.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    pos: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Give back the reader, positioned just after the last consumed byte.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> ByteSource for ReaderSource<R> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.inner.consume(1);
            self.pos += 1;
        }
        Ok(byte)
    }

    fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner.by_ref().take(len as u64).read_to_end(&mut buf)?;
        self.pos += buf.len();
        Ok(buf)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A destination for encoded bytes.
pub trait ByteSink {
    type Error;

    fn put(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl ByteSink for Vec<u8> {
    type Error = Infallible;

    fn put(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapts any [`Write`] into a [`ByteSink`].
#[derive(Debug)]
pub struct WriterSink<W>(pub W);

impl<W: Write> ByteSink for WriterSink<W> {
    type Error = io::Error;

    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.0.write_all(bytes)
    }
}

/// Write the decimal digits of `n` without allocating.
pub(crate) fn put_decimal<K: ByteSink>(n: u64, sink: &mut K) -> Result<(), K::Error> {
    let mut buf = [0u8; 20];
    let mut i = buf.len();
    let mut n = n;
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    sink.put(&buf[i..])
}
