//! Cross-checks against the `lz4_flex` reference decoder (`--verify`).
//!
//! The reference decoder is only a test oracle: each block is decoded by both
//! implementations and compared, and for every interior split point the block
//! suffix starting at its compressed offset is decoded on its own and compared
//! with the matching output suffix.

use crate::block::split::SplitPoint;

/// Whether the reference decoder was compiled in.
pub const AVAILABLE: bool = cfg!(feature = "verify");

#[cfg(feature = "verify")]
mod imp {
    use anyhow::{anyhow, ensure};

    use crate::block::split::SplitPoint;

    pub fn verify_block(block: &[u8], decoded: &[u8]) -> anyhow::Result<()> {
        let expected = lz4_flex::block::decompress(block, decoded.len())
            .map_err(|e| anyhow!("reference decoder rejected block: {e}"))?;
        ensure_same(&expected, decoded, 0)
    }

    pub fn verify_split_point(block: &[u8], decoded: &[u8], point: &SplitPoint) -> anyhow::Result<()> {
        ensure!(
            point.compressed_offset <= block.len() && point.decompressed_offset <= decoded.len(),
            "split point {:?} lies outside the block",
            point
        );
        let suffix = &block[point.compressed_offset..];
        let tail = &decoded[point.decompressed_offset..];
        let expected = lz4_flex::block::decompress(suffix, tail.len()).map_err(|e| {
            anyhow!(
                "reference decoder rejected suffix at compressed offset {}: {e}",
                point.compressed_offset
            )
        })?;
        ensure_same(&expected, tail, point.decompressed_offset)
    }

    fn ensure_same(expected: &[u8], actual: &[u8], base: usize) -> anyhow::Result<()> {
        ensure!(
            expected.len() == actual.len(),
            "decoded {} bytes, reference decoded {}",
            actual.len(),
            expected.len()
        );
        if let Some(i) = expected.iter().zip(actual).position(|(a, b)| a != b) {
            return Err(anyhow!(
                "output differs from reference at byte {}: {:#04x} != {:#04x}",
                base + i,
                actual[i],
                expected[i]
            ));
        }
        Ok(())
    }
}

#[cfg(not(feature = "verify"))]
mod imp {
    use anyhow::bail;

    use crate::block::split::SplitPoint;

    pub fn verify_block(_block: &[u8], _decoded: &[u8]) -> anyhow::Result<()> {
        bail!("built without the `verify` feature; no reference decoder available")
    }

    pub fn verify_split_point(_block: &[u8], _decoded: &[u8], _point: &SplitPoint) -> anyhow::Result<()> {
        bail!("built without the `verify` feature; no reference decoder available")
    }
}

/// Compares `decoded` with the reference decoder's output for `block`.
pub fn verify_block(block: &[u8], decoded: &[u8]) -> anyhow::Result<()> {
    imp::verify_block(block, decoded)
}

/// Decodes `block[point.compressed_offset..]` with the reference decoder and
/// compares it with `decoded[point.decompressed_offset..]`.
pub fn verify_split_point(block: &[u8], decoded: &[u8], point: &SplitPoint) -> anyhow::Result<()> {
    imp::verify_split_point(block, decoded, point)
}
