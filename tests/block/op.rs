// Tests for src/block/op.rs: single-sequence decoding and size accounting.

use crate::common::{compress_block, sample_text, BlockBuilder};
use lz4split::block::{collect_ops, Op};
use lz4split::cursor::ByteCursor;

#[test]
fn decodes_hand_built_ops() {
    let lit15: Vec<u8> = (0..15).collect();
    let lit300: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
    let block = BlockBuilder::new()
        .op(b"", 1, 4)
        .op(b"abc", 7, 18)
        .op(&lit15, 2, 19)
        .op(&lit300, 300, 600)
        .tail(b"end")
        .build();

    let mut c = ByteCursor::new(&block);
    let expected = [
        Op { literals: b"", offset: 1, match_length: 4 },
        Op { literals: b"abc", offset: 7, match_length: 18 },
        Op { literals: &lit15, offset: 2, match_length: 19 },
        Op { literals: &lit300, offset: 300, match_length: 600 },
        Op { literals: b"end", offset: 0, match_length: 0 },
    ];
    for want in expected {
        let before = c.position();
        let op = Op::decode(&mut c).unwrap();
        assert_eq!(op, want);
        assert_eq!(op.encoded_size(), c.position() - before, "{op}");
        assert_eq!(op.decoded_size(), want.literals.len() + want.match_length);
    }
    assert!(c.at_end());
    assert!(Op::decode(&mut c).unwrap().is_terminal());
}

#[test]
fn match_length_extension_boundaries() {
    // ml - 4 == 14 fits the nibble; 15 needs one extension byte (value 0).
    let fits = BlockBuilder::new().op(b"x", 1, 18).build();
    let extends = BlockBuilder::new().op(b"x", 1, 19).build();
    assert_eq!(extends.len(), fits.len() + 1);
    assert_eq!(*extends.last().unwrap(), 0);

    let op = Op::decode(&mut ByteCursor::new(&extends)).unwrap();
    assert_eq!(op.match_length, 19);
    assert_eq!(op.encoded_size(), extends.len());
}

#[test]
fn encoded_sizes_sum_to_block_length() {
    for size in [0usize, 1, 13, 100, 4_096, 70_000] {
        let block = compress_block(&sample_text(size));
        let ops = collect_ops(&block).unwrap();
        let encoded: usize = ops.iter().map(Op::encoded_size).sum();
        let decoded: usize = ops.iter().map(Op::decoded_size).sum();
        // A block that is a single empty tail token decodes to no ops.
        if ops.is_empty() {
            assert_eq!(size, 0);
            continue;
        }
        assert_eq!(encoded, block.len(), "size {size}");
        assert_eq!(decoded, size, "size {size}");
    }
}

#[test]
fn every_match_has_nonzero_offset() {
    let block = compress_block(&sample_text(20_000));
    for op in collect_ops(&block).unwrap() {
        if op.has_match() {
            assert!(op.offset > 0, "{op}");
            assert!(op.match_length >= 4, "{op}");
        }
    }
}

#[test]
fn truncated_literals_fail() {
    // Token promises 5 literals, only 2 present.
    let block = [0x50, b'a', b'b'];
    assert!(Op::decode(&mut ByteCursor::new(&block)).is_err());
}

#[test]
fn truncated_literal_extension_fails() {
    let block = [0xF0, 0xFF];
    assert!(Op::decode(&mut ByteCursor::new(&block)).is_err());
}
