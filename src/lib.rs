//! Static Huffman coding of byte streams.
//!
//! Encoding produces two artifacts: a packed bit stream holding the
//! concatenated codes, and a small text file of `(symbol, frequency)` pairs
//! from which the decoder rebuilds the same trie.
//!
//! ```
//! let input = b"AAAAABBBCCD";
//! let (mut packed, mut side) = (Vec::new(), Vec::new());
//! let summary = huffpack::encode(input, &mut packed, &mut side)?;
//! assert_eq!(summary.packed_bits, 20);
//!
//! let mut out = Vec::new();
//! huffpack::decode(&packed[..], &side[..], &mut out)?;
//! assert_eq!(out, input);
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod archive;
pub mod bits;
pub mod codec;
pub mod error;
pub mod freq;
pub mod queue;
pub mod table;
pub mod trie;

pub use archive::Archive;
pub use codec::{decode, encode, encode_reader, EncodeSummary};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use trie::{CodeTable, Node, Trie};
