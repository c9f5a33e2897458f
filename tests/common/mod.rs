// Shared helpers for the integration suites: a hand encoder for LZ4
// sequences, deterministic sample data, and reference-compressed blocks.
#![allow(dead_code)]

/// Appends the extension bytes for `n` (the part of a length above 15).
pub fn encode_sparse(out: &mut Vec<u8>, mut n: usize) {
    while n >= 255 {
        out.push(255);
        n -= 255;
    }
    out.push(n as u8);
}

/// Builds a block sequence by sequence.
#[derive(Debug, Default)]
pub struct BlockBuilder {
    bytes: Vec<u8>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence with a match; `match_length` must be at least 4.
    pub fn op(mut self, literals: &[u8], offset: u16, match_length: usize) -> Self {
        assert!(match_length >= 4);
        let ll = literals.len();
        let ml = match_length - 4;
        self.bytes.push(((ll.min(15) as u8) << 4) | ml.min(15) as u8);
        if ll >= 15 {
            encode_sparse(&mut self.bytes, ll - 15);
        }
        self.bytes.extend_from_slice(literals);
        self.bytes.extend_from_slice(&offset.to_le_bytes());
        if ml >= 15 {
            encode_sparse(&mut self.bytes, ml - 15);
        }
        self
    }

    /// The literals-only last sequence.
    pub fn tail(mut self, literals: &[u8]) -> Self {
        let ll = literals.len();
        self.bytes.push((ll.min(15) as u8) << 4);
        if ll >= 15 {
            encode_sparse(&mut self.bytes, ll - 15);
        }
        self.bytes.extend_from_slice(literals);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Compressible text of exactly `size` bytes with some variation per line.
pub fn sample_text(size: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
        "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    ];
    let mut out = Vec::with_capacity(size + 32);
    let mut state = 0x9E37_79B9u32;
    while out.len() < size {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        out.extend_from_slice(WORDS[state as usize % WORDS.len()].as_bytes());
        out.push(if state % 11 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(size);
    out
}

/// Incompressible bytes from a xorshift generator.
pub fn random_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Compresses `data` into one raw LZ4 block with the reference encoder.
pub fn compress_block(data: &[u8]) -> Vec<u8> {
    lz4_flex::block::compress(data)
}

/// Wraps raw blocks of `data` (split every `chunk` bytes) in a legacy frame.
pub fn legacy_frame(data: &[u8], chunk: usize) -> Vec<u8> {
    let mut out = 0x184C_2102u32.to_le_bytes().to_vec();
    for piece in data.chunks(chunk) {
        let block = compress_block(piece);
        out.extend_from_slice(&(block.len() as u32).to_le_bytes());
        out.extend_from_slice(&block);
    }
    out
}

/// Compresses `data` into a modern frame with the reference encoder.
pub fn modern_frame(data: &[u8], info: lz4_flex::frame::FrameInfo) -> Vec<u8> {
    use std::io::Write;

    let mut encoder = lz4_flex::frame::FrameEncoder::with_frame_info(info, Vec::new());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
