//! XXH32 helpers for frame checksums, backed by `xxhash-rust`.
//!
//! Modern LZ4 frames use XXH32 with seed 0 everywhere: the one-byte header
//! checksum, optional per-block checksums over the raw block bytes, and the
//! optional content checksum over the decoded output.

/// One-shot XXH32.
///
/// `xxh32_oneshot(b"", 0)` == `0x02CC5D05`.
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}

/// Header checksum byte over the descriptor bytes (FLG through the optional
/// dictionary id): `(XXH32(descriptor, 0) >> 8) & 0xFF`.
#[inline]
pub fn header_checksum(descriptor: &[u8]) -> u8 {
    ((xxh32_oneshot(descriptor, 0) >> 8) & 0xFF) as u8
}
