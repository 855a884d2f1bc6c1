//! Packed-stream encoder and trie-walking decoder.

use std::io::{self, BufRead, BufWriter, Read, Seek, SeekFrom, Write};
use tracing::debug;

use crate::bits::{BitReader, BitSink, BitSource, BitWriter};
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::table::{write_trie, TrieFile};
use crate::trie::{CodeTable, Node, Trie};

/// What an encode produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    pub total_symbols: u64,
    pub distinct_symbols: usize,
    pub packed_bits: u64,
}

/// Writes the code of every byte of `input` to `sink`, returning the bit count.
pub fn encode_symbols<S: BitSink>(input: &[u8], codes: &CodeTable, sink: &mut S) -> Result<u64> {
    let mut bits = 0;
    for &b in input {
        let code = codes.get(b).ok_or(Error::MissingCode(b))?;
        sink.write_bits(code)?;
        bits += code.len() as u64;
    }
    Ok(bits)
}

/// Decodes exactly `total` symbols by walking `trie` one bit at a time.
///
/// A single-leaf trie still consumes one bit per symbol.
pub fn decode_symbols<S, W>(source: &mut S, trie: &Trie, total: u64, out: &mut W) -> Result<()>
where
    S: BitSource,
    W: Write,
{
    let root = trie.root();
    for decoded in 0..total {
        let mut next_bit = || -> Result<bool> {
            source.read_bit()?.ok_or(Error::TruncatedStream {
                decoded,
                expected: total,
            })
        };

        let mut node = root;
        if node.is_leaf() {
            next_bit()?;
        }
        while let Node::Internal { left, right, .. } = node {
            node = if next_bit()? { &**right } else { &**left };
        }
        if let Node::Leaf { symbol, .. } = node {
            out.write_all(&[*symbol])?;
        }
    }
    Ok(())
}

/// Compresses `input` into a packed bit stream plus its side artifact.
pub fn encode<P: Write, T: Write>(input: &[u8], packed: P, trie_file: T) -> Result<EncodeSummary> {
    let freq = FrequencyTable::of(input);
    encode_counted(&freq, packed, trie_file, |codes, sink| {
        encode_symbols(input, codes, sink)
    })
}

/// Encodes a seekable stream in two passes: one to count, one to emit codes.
///
/// Both passes start from the stream position at call time.
pub fn encode_reader<R, P, T>(mut input: R, packed: P, trie_file: T) -> Result<EncodeSummary>
where
    R: Read + Seek,
    P: Write,
    T: Write,
{
    let start = input.stream_position()?;
    let freq = FrequencyTable::from_reader(&mut input)?;
    input.seek(SeekFrom::Start(start))?;

    encode_counted(&freq, packed, trie_file, |codes, sink| {
        let mut buf = [0u8; 8192];
        let mut bits = 0;
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            bits += encode_symbols(&buf[..n], codes, sink)?;
        }
        Ok(bits)
    })
}

fn encode_counted<P, T, F>(
    freq: &FrequencyTable,
    packed: P,
    trie_file: T,
    emit: F,
) -> Result<EncodeSummary>
where
    P: Write,
    T: Write,
    F: FnOnce(&CodeTable, &mut BitWriter<P>) -> Result<u64>,
{
    let mut sink = BitWriter::new(packed);

    if freq.total() == 0 {
        sink.finish()?;
        TrieFile::default().write_to(trie_file)?;
        debug!("encoded empty input");
        return Ok(EncodeSummary::default());
    }

    let trie = Trie::build(freq)?;
    let codes = trie.code_table();

    let packed_bits = emit(&codes, &mut sink)?;
    sink.finish()?;
    write_trie(&trie, freq, trie_file)?;

    let summary = EncodeSummary {
        total_symbols: freq.total(),
        distinct_symbols: codes.len(),
        packed_bits,
    };
    debug!(?summary, "encoded");
    Ok(summary)
}

/// Restores the original bytes from a packed stream and its side artifact.
///
/// Returns the number of bytes written to `out`.
pub fn decode<P: Read, T: BufRead, W: Write>(packed: P, trie_file: T, out: W) -> Result<u64> {
    let stored = TrieFile::read_from(trie_file)?;
    let mut out = BufWriter::new(out);

    if let Some(trie) = stored.rebuild()? {
        let mut source = BitReader::new(packed);
        decode_symbols(&mut source, &trie, stored.total_symbols, &mut out)?;
    }
    out.flush()?;

    debug!(total_symbols = stored.total_symbols, "decoded");
    Ok(stored.total_symbols)
}
