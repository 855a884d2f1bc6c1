//! Bit-level stream adapters.
//!
//! Bits are packed most-significant first; the last byte of a packed stream
//! is zero-padded.

use bitvec::prelude::*;
use std::io::{self, Read, Write};

/// Bytes buffered before a [`BitWriter`] hands them to its inner writer.
const CHUNK_BYTES: usize = 4096;

pub trait BitSink {
    fn write_bit(&mut self, bit: bool) -> io::Result<()>;

    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> io::Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

pub trait BitSource {
    /// Next bit, or `None` once the stream is exhausted.
    fn read_bit(&mut self) -> io::Result<Option<bool>>;
}

impl BitSink for BitVec<u8, Msb0> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.push(bit);
        Ok(())
    }

    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> io::Result<()> {
        self.extend_from_bitslice(bits);
        Ok(())
    }
}

/// Packs bits into bytes on top of any writer.
pub struct BitWriter<W: Write> {
    inner: W,
    buf: BitVec<u8, Msb0>,
    written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: BitVec::with_capacity(CHUNK_BYTES * 8),
            written: 0,
        }
    }

    /// Bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    fn drain_full_bytes(&mut self) -> io::Result<()> {
        let whole = self.buf.len() / 8 * 8;
        if whole == 0 {
            return Ok(());
        }
        self.inner.write_all(&self.buf.as_raw_slice()[..whole / 8])?;
        self.buf.drain(..whole);
        Ok(())
    }

    /// Pads the trailing partial byte with zeros, flushes, and returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.drain_full_bytes()?;
        if !self.buf.is_empty() {
            self.buf.set_uninitialized(false);
            self.inner.write_all(self.buf.as_raw_slice())?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.buf.push(bit);
        self.written += 1;
        if self.buf.len() >= CHUNK_BYTES * 8 {
            self.drain_full_bytes()?;
        }
        Ok(())
    }
}

/// Unpacks bits from any reader.
pub struct BitReader<R: Read> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    eof: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            eof: false,
        }
    }

    fn refill(&mut self) -> io::Result<()> {
        self.buf.resize(CHUNK_BYTES, 0);
        self.pos = 0;
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => {
                    self.buf.truncate(n);
                    self.eof = n == 0;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.clear();
                    return Err(e);
                }
            }
        }
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.pos == self.buf.len() * 8 {
            if self.eof {
                return Ok(None);
            }
            self.refill()?;
            if self.eof {
                return Ok(None);
            }
        }
        let bit = self.buf.view_bits::<Msb0>()[self.pos];
        self.pos += 1;
        Ok(Some(bit))
    }
}

/// Reads bits from an in-memory slice.
pub struct SliceReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(bits: &'a BitSlice<u8, Msb0>) -> Self {
        Self { bits, pos: 0 }
    }
}

impl BitSource for SliceReader<'_> {
    fn read_bit(&mut self) -> io::Result<Option<bool>> {
        let bit = self.bits.get(self.pos).map(|b| *b);
        if bit.is_some() {
            self.pos += 1;
        }
        Ok(bit)
    }
}
