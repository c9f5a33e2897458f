//! Error type shared by the cursor, block and frame layers.
//!
//! Every variant is fatal to the parse that produced it: LZ4 data carries no
//! redundancy to recover from, so callers propagate the error up to the host,
//! which decides whether to abort.

use core::fmt;

/// Errors returned while decoding LZ4 blocks and frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz4Error {
    /// A read asked for more bytes than remain in the cursor.
    OutOfBounds {
        /// Cursor position at the time of the read.
        offset: usize,
        requested: usize,
        available: usize,
    },
    /// The input does not start with a legacy or modern frame magic number.
    UnrecognizedMagic { magic: u32 },
    /// The FLG version bits of a modern frame are not `01`.
    UnsupportedVersion { version: u8 },
    /// A match reaches before the start of the decoded output (or has offset 0).
    InvalidBackReference {
        offset: usize,
        /// Output position, relative to the back-reference window, at which
        /// the match would have been copied.
        position: usize,
    },
    HeaderChecksumMismatch { expected: u8, actual: u8 },
    BlockChecksumMismatch { block: usize, expected: u32, actual: u32 },
    ContentChecksumMismatch { expected: u32, actual: u32 },
    ContentSizeMismatch { expected: u64, actual: u64 },
    /// A segment decoded by the parallel split decoder produced a different
    /// length than the split table predicted.
    SegmentLengthMismatch { segment: usize, expected: usize, actual: usize },
    /// A split table handed to the parallel decoder does not start at the
    /// block start, is not strictly increasing, or points past the block.
    InvalidSplitPoint { index: usize, compressed_offset: usize, decompressed_offset: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Lz4Error>;

impl fmt::Display for Lz4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Lz4Error::OutOfBounds { offset, requested, available } => write!(
                f,
                "out-of-bounds read at offset {offset}: requested {requested} bytes, {available} available"
            ),
            Lz4Error::UnrecognizedMagic { magic } => {
                write!(f, "unrecognized frame magic 0x{magic:08X}")
            }
            Lz4Error::UnsupportedVersion { version } => {
                write!(f, "unsupported frame version {version:#04b} (expected 0b01)")
            }
            Lz4Error::InvalidBackReference { offset, position } => write!(
                f,
                "invalid back-reference: offset {offset} at output position {position}"
            ),
            Lz4Error::HeaderChecksumMismatch { expected, actual } => write!(
                f,
                "frame header checksum mismatch: stored 0x{expected:02X}, computed 0x{actual:02X}"
            ),
            Lz4Error::BlockChecksumMismatch { block, expected, actual } => write!(
                f,
                "block {block} checksum mismatch: stored 0x{expected:08X}, computed 0x{actual:08X}"
            ),
            Lz4Error::ContentChecksumMismatch { expected, actual } => write!(
                f,
                "content checksum mismatch: stored 0x{expected:08X}, computed 0x{actual:08X}"
            ),
            Lz4Error::ContentSizeMismatch { expected, actual } => write!(
                f,
                "content size mismatch: header declares {expected} bytes, decoded {actual}"
            ),
            Lz4Error::SegmentLengthMismatch { segment, expected, actual } => write!(
                f,
                "split segment {segment} decoded {actual} bytes, expected {expected}"
            ),
            Lz4Error::InvalidSplitPoint { index, compressed_offset, decompressed_offset } => write!(
                f,
                "invalid split point {index}: compressed offset {compressed_offset}, decompressed offset {decompressed_offset}"
            ),
        }
    }
}

impl std::error::Error for Lz4Error {}
