//! Split-point discovery inside a single compressed block.
//!
//! A split point is an op boundary at which a fresh decoder could start:
//! beginning at `compressed_offset` in the block and writing at
//! `decompressed_offset` in the output, no op from that boundary onward reads
//! output bytes before `decompressed_offset`.
//!
//! For every op with a match, the earliest output byte it reads is mapped back
//! to the op that produced it (`deps[i]`). A boundary `i` is usable only if no
//! op at or after `i` depends on anything before `i`, so the dependency table
//! is min-propagated from the back before `deps[i] >= i` is tested.

use crate::block::op::Op;
use crate::block::sequence::collect_ops;
use crate::error::{Lz4Error, Result};

/// A compressed/decompressed offset pair at which decoding can restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitPoint {
    pub compressed_offset: usize,
    pub decompressed_offset: usize,
}

impl SplitPoint {
    /// `true` for the trivial split at the very start of the block.
    #[inline]
    pub fn is_block_start(&self) -> bool {
        self.compressed_offset == 0
    }
}

/// Decoded ops of a block together with its prefix-sum tables and split points.
#[derive(Debug, Clone)]
pub struct BlockSplit<'a> {
    pub ops: Vec<Op<'a>>,
    /// `decompressed[i]`: output bytes produced before op `i` (len = ops + 1).
    pub decompressed: Vec<usize>,
    /// `compressed[i]`: block bytes consumed before op `i` (len = ops + 1).
    pub compressed: Vec<usize>,
    pub points: Vec<SplitPoint>,
}

impl BlockSplit<'_> {
    /// Total decompressed size of the block.
    pub fn decompressed_len(&self) -> usize {
        self.decompressed.last().copied().unwrap_or(0)
    }

    /// Split points other than the block start.
    pub fn interior_points(&self) -> impl Iterator<Item = &SplitPoint> + '_ {
        self.points.iter().filter(|p| !p.is_block_start())
    }
}

/// Running totals of `metric` over `items`, starting with 0.
///
/// The result has `items.len() + 1` entries; entry `i` is the sum over
/// `items[..i]`.
pub fn prefix_sums_by<T, F>(items: &[T], metric: F) -> Vec<usize>
where
    F: Fn(&T) -> usize,
{
    let mut sums = Vec::with_capacity(items.len() + 1);
    let mut total = 0usize;
    sums.push(total);
    for item in items {
        total += metric(item);
        sums.push(total);
    }
    sums
}

/// Decodes `block` and computes its split points.
pub fn split_block(block: &[u8]) -> Result<BlockSplit<'_>> {
    let ops = collect_ops(block)?;
    let decompressed = prefix_sums_by(&ops, Op::decoded_size);
    let compressed = prefix_sums_by(&ops, Op::encoded_size);
    let deps = dependencies(&ops, &decompressed)?;

    let points = deps
        .iter()
        .enumerate()
        .filter(|&(i, &dep)| dep >= i)
        .map(|(i, _)| SplitPoint {
            compressed_offset: compressed[i],
            decompressed_offset: decompressed[i],
        })
        .collect();

    Ok(BlockSplit { ops, decompressed, compressed, points })
}

/// Convenience wrapper returning only the split points of `block`.
pub fn split_points(block: &[u8]) -> Result<Vec<SplitPoint>> {
    split_block(block).map(|split| split.points)
}

/// For each op, the index of the earliest op any op at or after it reads from.
fn dependencies(ops: &[Op<'_>], decompressed: &[usize]) -> Result<Vec<usize>> {
    let mut deps = Vec::with_capacity(ops.len());
    for (i, op) in ops.iter().enumerate() {
        if !op.has_match() {
            deps.push(i);
            continue;
        }
        let match_start = decompressed[i] + op.literals.len();
        let dependency = match_start.checked_sub(op.offset).filter(|_| op.offset > 0).ok_or(
            Lz4Error::InvalidBackReference { offset: op.offset, position: match_start },
        )?;
        // Greatest j with decompressed[j] <= dependency; decompressed[0] == 0
        // guarantees the partition point is at least 1.
        let j = decompressed.partition_point(|&start| start <= dependency) - 1;
        deps.push(j);
    }

    for i in (1..deps.len()).rev() {
        deps[i - 1] = deps[i - 1].min(deps[i]);
    }
    Ok(deps)
}
