//! Parallel decompression of one block across its split points.
//!
//! Each split point starts a segment: segment `k` covers compressed bytes
//! `[c_k, c_{k+1})` and output bytes `[d_k, d_{k+1})`. Because no op in a
//! segment reads output from before its own `d_k`, every segment is decoded
//! by a fresh [`OpSequence`] into its own disjoint slice of the output, on a
//! rayon pool.

use rayon::prelude::*;

use crate::block::op::Op;
use crate::block::sequence::OpSequence;
use crate::block::split::{BlockSplit, SplitPoint};
use crate::cursor::ByteCursor;
use crate::error::{Lz4Error, Result};

/// One independently decodable piece of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    compressed: (usize, usize),
    decompressed: (usize, usize),
}

/// Decompresses `block` by decoding the segments between `split.points`
/// concurrently on `nb_workers` threads.
///
/// The output is identical to [`decompress_block`](super::decompress::decompress_block).
/// Malformed point tables are rejected with [`Lz4Error::InvalidSplitPoint`]
/// before any output is written.
pub fn decompress_parallel(block: &[u8], split: &BlockSplit<'_>, nb_workers: usize) -> Result<Vec<u8>> {
    let compressed_len = ByteCursor::new(block).len();
    check_points(&split.points, compressed_len, split.decompressed_len())?;
    let segments = segments(&split.points, compressed_len, split.decompressed_len());
    let mut out = vec![0u8; split.decompressed_len()];

    let chunks = carve(&mut out, &segments);
    let work = || {
        segments
            .par_iter()
            .zip(chunks.into_par_iter())
            .enumerate()
            .try_for_each(|(index, (segment, chunk))| decode_segment(block, index, segment, chunk))
    };

    match rayon::ThreadPoolBuilder::new().num_threads(nb_workers.max(1)).build() {
        Ok(pool) => pool.install(work)?,
        // Fall back to the global pool if a dedicated one cannot be spawned.
        Err(_) => work()?,
    }
    Ok(out)
}

/// Checks that `points` can be carved into non-empty segments of a block
/// `compressed_len` bytes long that decodes to `decompressed_len` bytes.
fn check_points(points: &[SplitPoint], compressed_len: usize, decompressed_len: usize) -> Result<()> {
    let invalid = |index: usize, point: &SplitPoint| Lz4Error::InvalidSplitPoint {
        index,
        compressed_offset: point.compressed_offset,
        decompressed_offset: point.decompressed_offset,
    };

    let Some(first) = points.first() else {
        // Only a block that decodes to nothing has no block start.
        if decompressed_len == 0 {
            return Ok(());
        }
        return Err(invalid(0, &SplitPoint { compressed_offset: 0, decompressed_offset: 0 }));
    };
    if !first.is_block_start() {
        return Err(invalid(0, first));
    }
    for (index, pair) in points.windows(2).enumerate() {
        let (prev, point) = (&pair[0], &pair[1]);
        let increasing = point.compressed_offset > prev.compressed_offset
            && point.decompressed_offset > prev.decompressed_offset;
        let in_block =
            point.compressed_offset < compressed_len && point.decompressed_offset < decompressed_len;
        if !(increasing && in_block) {
            return Err(invalid(index + 1, point));
        }
    }
    Ok(())
}

/// Segment boundaries for `points`, which [`check_points`] has accepted.
fn segments(points: &[SplitPoint], compressed_len: usize, decompressed_len: usize) -> Vec<Segment> {
    points
        .iter()
        .enumerate()
        .map(|(k, p)| {
            let (c_end, d_end) = match points.get(k + 1) {
                Some(next) => (next.compressed_offset, next.decompressed_offset),
                None => (compressed_len, decompressed_len),
            };
            Segment {
                compressed: (p.compressed_offset, c_end),
                decompressed: (p.decompressed_offset, d_end),
            }
        })
        .collect()
}

/// Splits `out` into one mutable chunk per segment.
fn carve<'o>(mut out: &'o mut [u8], segments: &[Segment]) -> Vec<&'o mut [u8]> {
    let mut chunks = Vec::with_capacity(segments.len());
    for segment in segments {
        let (start, end) = segment.decompressed;
        let (head, tail) = out.split_at_mut(end - start);
        chunks.push(head);
        out = tail;
    }
    chunks
}

fn decode_segment(block: &[u8], index: usize, segment: &Segment, chunk: &mut [u8]) -> Result<()> {
    let (start, end) = segment.compressed;
    let cursor = ByteCursor::new(block).sub_cursor(start, end - start)?;

    let mut written = 0usize;
    for op in OpSequence::from_cursor(cursor) {
        written = write_op(&op?, chunk, written, index)?;
    }
    if written != chunk.len() {
        return Err(Lz4Error::SegmentLengthMismatch {
            segment: index,
            expected: chunk.len(),
            actual: written,
        });
    }
    Ok(())
}

/// Executes `op` into a fixed-size chunk at `pos`, returning the new position.
fn write_op(op: &Op<'_>, chunk: &mut [u8], pos: usize, segment: usize) -> Result<usize> {
    let literal_end = pos + op.literals.len();
    let match_end = literal_end + op.match_length;
    if match_end > chunk.len() {
        return Err(Lz4Error::SegmentLengthMismatch {
            segment,
            expected: chunk.len(),
            actual: match_end,
        });
    }
    chunk[pos..literal_end].copy_from_slice(op.literals);
    if op.match_length == 0 {
        return Ok(literal_end);
    }
    if op.offset == 0 || op.offset > literal_end {
        return Err(Lz4Error::InvalidBackReference { offset: op.offset, position: literal_end });
    }

    let src = literal_end - op.offset;
    if op.match_length > op.offset {
        for i in 0..op.match_length {
            chunk[literal_end + i] = chunk[src + i];
        }
    } else {
        chunk.copy_within(src..src + op.match_length, literal_end);
    }
    Ok(match_end)
}
