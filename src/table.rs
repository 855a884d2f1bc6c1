//! Text side artifact that lets a decoder rebuild the trie.
//!
//! ```text
//! <total symbol count>
//! <symbol in binary>:<frequency>
//! ...
//! ```
//!
//! Entries are written in ascending symbol order; readers accept any order.

use std::io::{BufRead, BufWriter, Write};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::freq::{FrequencyTable, ALPHABET_SIZE};
use crate::trie::Trie;

const DELIMITER: char = ':';

/// Parsed contents of a side artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieFile {
    pub total_symbols: u64,
    pub frequencies: FrequencyTable,
}

impl TrieFile {
    /// Captures the leaves of `trie`; the total comes from `freq`.
    pub fn new(trie: &Trie, freq: &FrequencyTable) -> Self {
        Self {
            total_symbols: freq.total(),
            frequencies: FrequencyTable::from_pairs(trie.leaves()),
        }
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut out = BufWriter::new(out);
        writeln!(out, "{}", self.total_symbols)?;
        for (symbol, count) in self.frequencies.iter() {
            writeln!(out, "{:b}{}{}", symbol, DELIMITER, count)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn read_from<R: BufRead>(input: R) -> Result<Self> {
        let mut lines = input.lines();

        let total_symbols = match lines.next() {
            Some(line) => parse_decimal(line?.trim_end_matches('\r'))
                .ok_or_else(|| Error::malformed(1, "total symbol count is not a number"))?,
            None => return Err(Error::malformed(1, "missing total symbol count")),
        };

        let mut counts = [0u64; ALPHABET_SIZE];
        let mut sum: u64 = 0;
        for (idx, line) in lines.enumerate() {
            let lineno = idx + 2;
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let (symbol, count) = parse_entry(line).ok_or_else(|| {
                Error::malformed(lineno, format!("expected <binary-symbol>{DELIMITER}<frequency>"))
            })?;
            if count == 0 {
                return Err(Error::malformed(lineno, "zero frequency"));
            }
            if counts[symbol as usize] != 0 {
                return Err(Error::malformed(lineno, format!("duplicate symbol {symbol:#04x}")));
            }
            counts[symbol as usize] = count;
            sum = sum
                .checked_add(count)
                .ok_or_else(|| Error::malformed(lineno, "frequencies overflow"))?;
        }

        if sum != total_symbols {
            return Err(Error::malformed(
                1,
                format!("total {total_symbols} does not match frequency sum {sum}"),
            ));
        }

        let frequencies = FrequencyTable::from_pairs(
            counts
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .map(|(s, &c)| (s as u8, c)),
        );
        debug!(total_symbols, distinct = frequencies.distinct(), "read trie file");

        Ok(Self {
            total_symbols,
            frequencies,
        })
    }

    /// Reruns trie construction on the stored counts; `None` for an empty input.
    pub fn rebuild(&self) -> Result<Option<Trie>> {
        if self.frequencies.distinct() == 0 {
            return Ok(None);
        }
        let trie = Trie::build(&self.frequencies)?;
        trace!(leaves = trie.leaf_count(), "rebuilt trie");
        Ok(Some(trie))
    }
}

/// Writes the side artifact for `trie`.
pub fn write_trie<W: Write>(trie: &Trie, freq: &FrequencyTable, out: W) -> Result<()> {
    TrieFile::new(trie, freq).write_to(out)
}

/// Reads a side artifact, returning the total symbol count and the rebuilt trie.
pub fn read_trie<R: BufRead>(input: R) -> Result<(u64, Option<Trie>)> {
    let file = TrieFile::read_from(input)?;
    let trie = file.rebuild()?;
    Ok((file.total_symbols, trie))
}

fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_entry(line: &str) -> Option<(u8, u64)> {
    let (symbol, count) = line.split_once(DELIMITER)?;
    if symbol.is_empty() || !symbol.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    let symbol = u8::from_str_radix(symbol, 2).ok()?;
    Some((symbol, parse_decimal(count)?))
}
