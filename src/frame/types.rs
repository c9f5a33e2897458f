//! Frame container types: descriptor flags, parsed blocks and the frame itself.

/// FLG byte of a modern frame, unpacked.
///
/// | bit | field |
/// |-----|-------|
/// | 0   | dictionary ID present |
/// | 2   | content checksum present |
/// | 3   | content size present |
/// | 4   | block checksums present |
/// | 5   | blocks independent |
/// | 6-7 | version (must be `01`) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags {
    pub dictionary_id: bool,
    pub content_checksum: bool,
    pub content_size: bool,
    pub block_checksum: bool,
    pub block_independence: bool,
    pub version: u8,
}

impl FrameFlags {
    pub fn from_byte(flg: u8) -> Self {
        FrameFlags {
            dictionary_id: flg & 1 != 0,
            content_checksum: (flg >> 2) & 1 != 0,
            content_size: (flg >> 3) & 1 != 0,
            block_checksum: (flg >> 4) & 1 != 0,
            block_independence: (flg >> 5) & 1 != 0,
            version: (flg >> 6) & 3,
        }
    }

    pub fn to_byte(self) -> u8 {
        (self.dictionary_id as u8)
            | (self.content_checksum as u8) << 2
            | (self.content_size as u8) << 3
            | (self.block_checksum as u8) << 4
            | (self.block_independence as u8) << 5
            | (self.version & 3) << 6
    }
}

/// Header fields of a modern frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDescriptor {
    pub flags: FrameFlags,
    /// Raw BD byte; bits 4-6 hold the block maximum-size id.
    pub block_descriptor: u8,
    pub content_size: Option<u64>,
    pub dictionary_id: Option<u32>,
    pub header_checksum: u8,
}

impl FrameDescriptor {
    /// Largest block the encoder promised to emit, from the BD byte.
    ///
    /// Ids 4..=7 map to 64 KiB, 256 KiB, 1 MiB and 4 MiB; anything else is `None`.
    pub fn block_max_size(&self) -> Option<usize> {
        match (self.block_descriptor >> 4) & 0x7 {
            id @ 4..=7 => Some(1 << (8 + 2 * id as usize)),
            _ => None,
        }
    }
}

/// Which container variant a frame was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// `0x184C2102`: length-prefixed independent blocks, no header.
    Legacy,
    /// `0x184D2204`: descriptor, flagged options, end mark.
    Modern(FrameDescriptor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// LZ4 block-encoded data.
    Compressed,
    /// Raw bytes stored as-is (block size had its high bit set).
    Stored,
}

/// One data block of a frame, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBlock<'a> {
    pub kind: BlockKind,
    pub data: &'a [u8],
    /// Stored block checksum, when the frame carries them.
    pub checksum: Option<u32>,
}

/// A parsed frame. All slices borrow the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub kind: FrameKind,
    /// Compressed blocks only, in file order.
    pub blocks: Vec<&'a [u8]>,
    /// Every data block (compressed and stored), in file order.
    pub segments: Vec<FrameBlock<'a>>,
    pub content_checksum: Option<u32>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(kind: FrameKind) -> Self {
        Frame { kind, blocks: Vec::new(), segments: Vec::new(), content_checksum: None }
    }

    pub fn descriptor(&self) -> Option<&FrameDescriptor> {
        match &self.kind {
            FrameKind::Modern(desc) => Some(desc),
            FrameKind::Legacy => None,
        }
    }

    /// Whether each block can be decoded without the previous blocks' output.
    ///
    /// Legacy frames are always independent.
    pub fn blocks_independent(&self) -> bool {
        self.descriptor().map_or(true, |d| d.flags.block_independence)
    }

    pub(crate) fn push(&mut self, block: FrameBlock<'a>) {
        if block.kind == BlockKind::Compressed {
            self.blocks.push(block.data);
        }
        self.segments.push(block);
    }
}
