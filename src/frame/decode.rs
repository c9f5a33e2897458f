//! Whole-frame decompression.

use crate::block::decompress::decompress_block_into;
use crate::config::DecodeOptions;
use crate::displaylevel;
use crate::error::{Lz4Error, Result};
use crate::frame::parse::parse_frame_with;
use crate::frame::types::{BlockKind, Frame};
use crate::xxhash::xxh32_oneshot;

/// Decodes every block of `frame`, in order, into one buffer.
///
/// Independent frames give each block a fresh back-reference window; linked
/// frames let blocks reference everything decoded before them. Stored blocks
/// are copied verbatim.
///
/// With `opts.verify_checksums`, block checksums, the content checksum and
/// the declared content size are checked.
pub fn decompress_frame(frame: &Frame<'_>, opts: &DecodeOptions) -> Result<Vec<u8>> {
    let independent = frame.blocks_independent();
    let mut out = Vec::new();

    for (index, block) in frame.segments.iter().enumerate() {
        if opts.verify_checksums {
            if let Some(expected) = block.checksum {
                let actual = xxh32_oneshot(block.data, 0);
                if actual != expected {
                    return Err(Lz4Error::BlockChecksumMismatch { block: index, expected, actual });
                }
            }
        }
        match block.kind {
            BlockKind::Stored => out.extend_from_slice(block.data),
            BlockKind::Compressed => {
                let window_start = if independent { out.len() } else { 0 };
                let n = decompress_block_into(block.data, &mut out, window_start)?;
                displaylevel!(4, "Block {}: {} -> {} bytes\n", index, block.data.len(), n);
            }
        }
    }

    if opts.verify_checksums {
        verify_content(frame, &out)?;
    }
    Ok(out)
}

/// Parses and decompresses a frame in one call.
pub fn decompress_frame_to_vec(data: &[u8], opts: &DecodeOptions) -> Result<Vec<u8>> {
    let frame = parse_frame_with(data, opts)?;
    decompress_frame(&frame, opts)
}

fn verify_content(frame: &Frame<'_>, out: &[u8]) -> Result<()> {
    if let Some(expected) = frame.descriptor().and_then(|d| d.content_size) {
        let actual = out.len() as u64;
        if actual != expected {
            return Err(Lz4Error::ContentSizeMismatch { expected, actual });
        }
    }
    if let Some(expected) = frame.content_checksum {
        let actual = xxh32_oneshot(out, 0);
        if actual != expected {
            return Err(Lz4Error::ContentChecksumMismatch { expected, actual });
        }
    }
    Ok(())
}
