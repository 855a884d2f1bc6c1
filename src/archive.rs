//! Single-file container: packed bits plus the symbol counts needed to
//! rebuild the trie, stored as MessagePack.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bits::SliceReader;
use crate::codec::{decode_symbols, encode_symbols};
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::trie::Trie;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    total_symbols: u64,
    symbols: Vec<(u8, u64)>,
    bit_len: u64,
    data: Vec<u8>,
}

impl Archive {
    pub fn compress(input: &[u8]) -> Result<Self> {
        let freq = FrequencyTable::of(input);
        let mut bits: BitVec<u8, Msb0> = BitVec::new();

        if freq.total() > 0 {
            let trie = Trie::build(&freq)?;
            encode_symbols(input, &trie.code_table(), &mut bits)?;
        }

        let bit_len = bits.len() as u64;
        bits.set_uninitialized(false);

        Ok(Self {
            total_symbols: freq.total(),
            symbols: freq.iter().collect(),
            bit_len,
            data: bits.into_vec(),
        })
    }

    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn decompress(&self) -> Result<Vec<u8>> {
        let freq = FrequencyTable::from_pairs(self.symbols.iter().copied());
        if freq.checked_total() != Some(self.total_symbols)
            || freq.distinct() != self.symbols.len()
        {
            return Err(Error::CorruptArchive(format!(
                "symbol table does not add up to {} symbols",
                self.total_symbols
            )));
        }

        let stored = self.data.view_bits::<Msb0>();
        let len = usize::try_from(self.bit_len)
            .ok()
            .filter(|&n| n <= stored.len())
            .ok_or_else(|| {
                Error::CorruptArchive(format!("bit length {} exceeds data", self.bit_len))
            })?;

        let mut out = Vec::new();
        if freq.distinct() > 0 {
            let trie = Trie::build(&freq)?;
            let mut source = SliceReader::new(&stored[..len]);
            decode_symbols(&mut source, &trie, self.total_symbols, &mut out)?;
        }
        Ok(out)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec(self)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
