use std::io::{self, Read};

/// Number of distinct symbols: every byte value.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for each byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    /// Counts every byte of `bytes` in a single pass.
    pub fn of(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        table.add(bytes);
        table
    }

    /// Counts a whole stream, propagating any read failure.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::default();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.add(&buf[..n]);
        }
        Ok(table)
    }

    fn add(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts[b as usize] += 1;
        }
    }

    /// Builds a table from `(symbol, count)` pairs; later pairs overwrite earlier ones.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, u64)>) -> Self {
        let mut table = Self::default();
        for (symbol, count) in pairs {
            table.counts[symbol as usize] = count;
        }
        table
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Like [`total`](Self::total), but `None` if the counts overflow `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Nonzero entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes() {
        let table = FrequencyTable::of(b"AAAAABBBCCD");
        assert_eq!(table.get(b'A'), 5);
        assert_eq!(table.get(b'B'), 3);
        assert_eq!(table.get(b'C'), 2);
        assert_eq!(table.get(b'D'), 1);
        assert_eq!(table.get(b'E'), 0);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct(), 4);
    }

    #[test]
    fn iter_is_sorted_and_skips_zero() {
        let table = FrequencyTable::of(&[255, 0, 7, 0]);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![(0, 2), (7, 1), (255, 1)]);
    }

    #[test]
    fn reader_matches_slice() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 31 % 251) as u8).collect();
        let streamed = FrequencyTable::from_reader(&data[..]).unwrap();
        assert_eq!(streamed, FrequencyTable::of(&data));
    }

    #[test]
    fn reader_error_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }
        assert!(FrequencyTable::from_reader(Broken).is_err());
    }

    #[test]
    fn checked_total_detects_overflow() {
        let table = FrequencyTable::from_pairs([(0, u64::MAX), (1, 1)]);
        assert_eq!(table.checked_total(), None);
        assert_eq!(FrequencyTable::of(b"abc").checked_total(), Some(3));
    }

    #[test]
    fn empty_input() {
        let table = FrequencyTable::of(b"");
        assert_eq!(table.total(), 0);
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }
}
