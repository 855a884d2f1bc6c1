//! Error types for the codec.

use std::io;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by encode and decode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Extract-min on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Read or write failure on an underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The side artifact does not parse.
    #[error("malformed trie file at line {line}: {reason}")]
    MalformedTrieFile { line: usize, reason: String },

    /// The packed stream ran out of bits.
    #[error("packed stream ended after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    /// A byte was handed to the encoder that its code table does not cover.
    #[error("no code for symbol {0:#04x}")]
    MissingCode(u8),

    /// An archive whose header disagrees with its own symbol table.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("archive encode error: {0}")]
    ArchiveEncode(#[from] rmp_serde::encode::Error),

    #[error("archive decode error: {0}")]
    ArchiveDecode(#[from] rmp_serde::decode::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedTrieFile {
            line,
            reason: reason.into(),
        }
    }
}
