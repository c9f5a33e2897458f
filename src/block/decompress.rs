//! Block decompression: replays an op sequence into an output buffer.
//!
//! # Overlapping matches
//!
//! When `match_length > offset` the source and destination ranges of a match
//! overlap and the copy must run forward one byte at a time so that bytes
//! written early in the match are read again later in it (an offset of 1
//! repeats a single byte). Non-overlapping matches are copied in bulk.

use crate::block::op::Op;
use crate::block::sequence::OpSequence;
use crate::displaylevel;
use crate::error::{Lz4Error, Result};

/// Decompresses one self-contained block.
pub fn decompress_block(block: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(block.len());
    decompress_block_into(block, &mut out, 0)?;
    displaylevel!(4, "Decompressed block size: {}\n", out.len());
    Ok(out)
}

/// Appends the decompressed contents of `block` to `out`.
///
/// Back-references may reach down to `out[window_start]`; pass `out.len()`
/// for an independent block or `0` to let every previously decoded byte act
/// as history (linked frame blocks).
///
/// Returns the number of bytes appended. On error `out` holds whatever was
/// decoded before the failing op.
pub fn decompress_block_into(block: &[u8], out: &mut Vec<u8>, window_start: usize) -> Result<usize> {
    let start = out.len();
    for op in OpSequence::new(block) {
        apply_op(&op?, out, window_start)?;
    }
    Ok(out.len() - start)
}

/// Executes a single op against `out`.
pub fn apply_op(op: &Op<'_>, out: &mut Vec<u8>, window_start: usize) -> Result<()> {
    out.extend_from_slice(op.literals);
    if op.match_length == 0 {
        return Ok(());
    }

    let pos = out.len();
    let history = pos - window_start.min(pos);
    if op.offset == 0 || op.offset > history {
        return Err(Lz4Error::InvalidBackReference { offset: op.offset, position: history });
    }

    reserve_pow2(out, pos + op.match_length);
    let src = pos - op.offset;
    if op.match_length > op.offset {
        for i in 0..op.match_length {
            let byte = out[src + i];
            out.push(byte);
        }
    } else {
        out.extend_from_within(src..src + op.match_length);
    }
    Ok(())
}

/// Grows capacity to the next power of two covering `needed`.
fn reserve_pow2(out: &mut Vec<u8>, needed: usize) {
    if out.capacity() < needed {
        let target = needed.checked_next_power_of_two().unwrap_or(needed);
        out.reserve_exact(target - out.len());
    }
}
