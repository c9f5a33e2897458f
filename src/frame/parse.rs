//! Frame container parsing: magic dispatch, descriptor, block table.
//!
//! Parsing only slices the input; no block is decoded here. The result lists
//! the raw compressed blocks in file order so they can be fed to the block
//! decompressor or the splitter.

use crate::config::{DecodeOptions, BLOCK_UNCOMPRESSED_FLAG, FRAME_MAGIC, LEGACY_MAGIC};
use crate::cursor::ByteCursor;
use crate::displaylevel;
use crate::error::{Lz4Error, Result};
use crate::frame::types::{BlockKind, Frame, FrameBlock, FrameDescriptor, FrameFlags, FrameKind};
use crate::xxhash::header_checksum;

/// Parses a legacy or modern frame without verifying any checksum.
pub fn parse_frame(data: &[u8]) -> Result<Frame<'_>> {
    parse_frame_with(data, &DecodeOptions { verify_checksums: false, nb_workers: 1 })
}

/// Parses a frame, verifying the header checksum when `opts.verify_checksums` is set.
///
/// Block and content checksums are recorded but only checked by
/// [`decompress_frame`](super::decode::decompress_frame), which has the
/// decoded content at hand.
pub fn parse_frame_with<'a>(data: &'a [u8], opts: &DecodeOptions) -> Result<Frame<'a>> {
    let mut cursor = ByteCursor::new(data);
    match cursor.read_u32()? {
        LEGACY_MAGIC => parse_legacy(&mut cursor),
        FRAME_MAGIC => parse_modern(&mut cursor, opts),
        magic => Err(Lz4Error::UnrecognizedMagic { magic }),
    }
}

fn parse_legacy<'a>(cursor: &mut ByteCursor<'a>) -> Result<Frame<'a>> {
    let mut frame = Frame::new(FrameKind::Legacy);
    while !cursor.at_end() {
        let block_size = cursor.read_u32()? as usize;
        let data = cursor.read_bytes(block_size)?;
        frame.push(FrameBlock { kind: BlockKind::Compressed, data, checksum: None });
    }
    Ok(frame)
}

fn parse_modern<'a>(cursor: &mut ByteCursor<'a>, opts: &DecodeOptions) -> Result<Frame<'a>> {
    let descriptor = read_descriptor(cursor, opts)?;
    let flags = descriptor.flags;
    let mut frame = Frame::new(FrameKind::Modern(descriptor));

    while !cursor.at_end() {
        let block_size = cursor.read_u32()?;
        if block_size == 0 {
            break;
        }
        let len = (block_size & !BLOCK_UNCOMPRESSED_FLAG) as usize;
        let kind = if block_size & BLOCK_UNCOMPRESSED_FLAG != 0 {
            displaylevel!(4, "Detected uncompressed block of size {}\n", len);
            BlockKind::Stored
        } else {
            BlockKind::Compressed
        };
        let data = cursor.read_bytes(len)?;
        let checksum = if flags.block_checksum { Some(cursor.read_u32()?) } else { None };
        frame.push(FrameBlock { kind, data, checksum });
    }

    if flags.content_checksum {
        frame.content_checksum = Some(cursor.read_u32()?);
    }
    Ok(frame)
}

/// Reads FLG, BD, the optional content size and dictionary id, and HC.
fn read_descriptor(cursor: &mut ByteCursor<'_>, opts: &DecodeOptions) -> Result<FrameDescriptor> {
    let start = cursor.position();
    let flags = FrameFlags::from_byte(cursor.read_u8()?);
    if flags.version != 1 {
        return Err(Lz4Error::UnsupportedVersion { version: flags.version });
    }
    let block_descriptor = cursor.read_u8()?;
    let content_size = if flags.content_size { Some(cursor.read_u64()?) } else { None };
    let dictionary_id = if flags.dictionary_id { Some(cursor.read_u32()?) } else { None };
    let end = cursor.position();
    let stored = cursor.read_u8()?;

    if opts.verify_checksums {
        let computed = header_checksum(&cursor.as_slice()[start..end]);
        if computed != stored {
            return Err(Lz4Error::HeaderChecksumMismatch { expected: stored, actual: computed });
        }
    }

    Ok(FrameDescriptor {
        flags,
        block_descriptor,
        content_size,
        dictionary_id,
        header_checksum: stored,
    })
}
