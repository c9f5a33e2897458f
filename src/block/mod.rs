//! LZ4 block decoding and split-point analysis.
//!
//! [`op`] decodes single sequences, [`sequence`] iterates them, and the two
//! consumers [`decompress`] and [`split`] replay or analyze the sequence.
//! [`parallel`] combines both to decode one block on several threads.

pub mod decompress;
pub mod op;
pub mod parallel;
pub mod sequence;
pub mod split;

pub use decompress::{apply_op, decompress_block, decompress_block_into};
pub use op::Op;
pub use parallel::decompress_parallel;
pub use sequence::{collect_ops, OpSequence};
pub use split::{prefix_sums_by, split_block, split_points, BlockSplit, SplitPoint};
