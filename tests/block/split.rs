// Tests for src/block/split.rs: split-point validity on hand-built and
// reference-compressed blocks.

use crate::common::{compress_block, random_bytes, sample_text, BlockBuilder};
use lz4split::block::{decompress_block, split_block, split_points, BlockSplit, SplitPoint};

/// Every op at or after each split point only reads output produced at or
/// after that point.
fn assert_points_valid(split: &BlockSplit<'_>) {
    for point in &split.points {
        let start = split
            .compressed
            .iter()
            .position(|&c| c == point.compressed_offset)
            .expect("split point must sit on an op boundary");
        assert_eq!(split.decompressed[start], point.decompressed_offset);

        for (k, op) in split.ops.iter().enumerate().skip(start) {
            if !op.has_match() {
                continue;
            }
            let relative = split.decompressed[k] - point.decompressed_offset + op.literals.len();
            assert!(
                op.offset <= relative,
                "op {k} reaches {} bytes before split {:?}",
                op.offset - relative,
                point
            );
        }
    }
}

#[test]
fn block_start_always_present() {
    let block = compress_block(&sample_text(10_000));
    let split = split_block(&block).unwrap();
    assert_eq!(
        split.points[0],
        SplitPoint { compressed_offset: 0, decompressed_offset: 0 }
    );
    assert!(split.points[0].is_block_start());
}

#[test]
fn points_are_valid_on_text() {
    for size in [1_000usize, 65_536, 500_000] {
        let block = compress_block(&sample_text(size));
        let split = split_block(&block).unwrap();
        assert_eq!(split.decompressed_len(), size);
        assert_points_valid(&split);
    }
}

#[test]
fn points_are_sorted_and_unique() {
    let block = compress_block(&sample_text(200_000));
    let points = split_block(&block).unwrap().points;
    assert!(points.windows(2).all(|w| w[0].compressed_offset < w[1].compressed_offset));
    assert!(points.windows(2).all(|w| w[0].decompressed_offset < w[1].decompressed_offset));
}

/// Decoding the block suffix at each split point with the reference decoder
/// reproduces the output suffix.
#[test]
fn suffixes_decode_independently() {
    let data = sample_text(150_000);
    let block = compress_block(&data);
    let split = split_block(&block).unwrap();
    assert_eq!(decompress_block(&block).unwrap(), data);

    let interior: Vec<_> = split.interior_points().collect();
    let stride = (interior.len() / 32).max(1);
    for point in interior.into_iter().step_by(stride) {
        let suffix = &block[point.compressed_offset..];
        let expected = &data[point.decompressed_offset..];
        let decoded = lz4_flex::block::decompress(suffix, expected.len()).unwrap();
        assert_eq!(decoded, expected, "{point:?}");
    }
}

/// Random data compresses to mostly literals, so splits are plentiful.
#[test]
fn random_data_has_interior_points() {
    let mut data = random_bytes(40_000, 3);
    // A repeated region keeps some matches in the block.
    let copy = data[1_000..3_000].to_vec();
    data.extend_from_slice(&copy);
    data.extend_from_slice(&random_bytes(10_000, 9));
    let block = compress_block(&data);
    let split = split_block(&block).unwrap();
    assert_points_valid(&split);
    // The last literal-only stretch after the repeated region is independent.
    assert!(split.interior_points().any(|p| p.decompressed_offset >= 42_000));
}

#[test]
fn long_range_reference_removes_intermediate_points() {
    // op0 self-contained, op1 self-contained, op2 reaches back into op0.
    let block = BlockBuilder::new()
        .op(b"0123", 4, 4) // out 0..8
        .op(b"ab", 2, 4) //   out 8..14
        .op(b"", 14, 4) //    out 14..18, reads from 0
        .op(b"cd", 2, 4) //   out 18..24, reads from 18
        .tail(b"!")
        .build();
    let split = split_block(&block).unwrap();
    let interior: Vec<_> = split.interior_points().map(|p| p.decompressed_offset).collect();
    assert_eq!(interior, vec![18, 24]);
    assert_points_valid(&split);
}

#[test]
fn chain_of_short_references_keeps_every_boundary() {
    let mut builder = BlockBuilder::new();
    for _ in 0..10 {
        builder = builder.op(b"xy", 2, 4);
    }
    let block = builder.tail(b"end").build();
    let split = split_block(&block).unwrap();
    assert_eq!(split.points.len(), 11);
    assert_points_valid(&split);
}

#[test]
fn split_points_matches_full_analysis() {
    let block = compress_block(&sample_text(50_000));
    assert_eq!(split_points(&block).unwrap(), split_block(&block).unwrap().points);
    assert!(split_points(&[]).unwrap().is_empty());
    assert!(split_points(&[0x40, b'a']).is_err());
}
