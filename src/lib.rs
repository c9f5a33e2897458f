// lz4split: LZ4 block/frame decoder and block split-point analyzer

pub mod block;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod xxhash;

pub const LZ4SPLIT_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    decompress_block, decompress_parallel, split_block, split_points, BlockSplit, Op, OpSequence,
    SplitPoint,
};
pub use config::DecodeOptions;
pub use cursor::ByteCursor;
pub use error::{Lz4Error, Result};
pub use frame::{decompress_frame, parse_frame, Frame};
