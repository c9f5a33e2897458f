//! Interoperability with the system `lz4` binary.
//!
//! Frames written by the reference C tool (modern, linked and legacy) are
//! decoded by the library and by the `lz4split` binary. If no `lz4` binary is
//! found the tests print a skip message and return without failing.

#[path = "../tests/common/mod.rs"]
mod common;

use std::path::{Path, PathBuf};
use std::process::Command;

use common::{random_bytes, sample_text};
use lz4split::frame::{decompress_frame_to_vec, parse_frame};
use lz4split::{split_block, DecodeOptions};
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the path to the system `lz4` binary, or `None` if not found.
fn system_lz4() -> Option<String> {
    if let Ok(p) = std::env::var("LZ4_BIN") {
        if Path::new(&p).exists() {
            return Some(p);
        }
    }
    let out = Command::new("which").arg("lz4").output().ok()?;
    if out.status.success() {
        let path = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(path);
        }
    }
    None
}

fn lz4split_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lz4split"))
}

fn content() -> Vec<u8> {
    let mut data = sample_text(300_000);
    data.extend_from_slice(&random_bytes(50_000, 99));
    data.extend_from_slice(&sample_text(100_000));
    data
}

/// Compresses `data` with the system tool and returns the frame bytes.
fn c_compress(lz4_bin: &str, dir: &TempDir, data: &[u8], flags: &[&str]) -> Vec<u8> {
    let input = dir.path().join("plain.bin");
    let output = dir.path().join("plain.bin.lz4");
    std::fs::write(&input, data).expect("write input");
    let status = Command::new(lz4_bin)
        .args(flags)
        .args(["-f", input.to_str().unwrap(), output.to_str().unwrap()])
        .status()
        .expect("spawn system lz4");
    assert!(status.success(), "system lz4 {flags:?} failed: {status:?}");
    std::fs::read(&output).expect("read compressed output")
}

fn verifying() -> DecodeOptions {
    DecodeOptions { verify_checksums: true, nb_workers: 2 }
}

// ─────────────────────────────────────────────────────────────────────────────
// Library decoding of C-written frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn c_modern_frame_library_decode() {
    let Some(lz4_bin) = system_lz4() else {
        println!("SKIP c_modern_frame_library_decode: system lz4 binary not found");
        return;
    };
    let dir = TempDir::new().unwrap();
    let data = content();

    for flags in [&["-1"][..], &["-9"], &["-B4", "--content-size"], &["-BX"]] {
        let frame = c_compress(&lz4_bin, &dir, &data, flags);
        assert_eq!(decompress_frame_to_vec(&frame, &verifying()).unwrap(), data, "{flags:?}");
    }
}

#[test]
fn c_linked_frame_library_decode() {
    let Some(lz4_bin) = system_lz4() else {
        println!("SKIP c_linked_frame_library_decode: system lz4 binary not found");
        return;
    };
    let dir = TempDir::new().unwrap();
    let data = content();
    let frame = c_compress(&lz4_bin, &dir, &data, &["-B4", "-BD"]);
    let parsed = parse_frame(&frame).unwrap();
    assert!(!parsed.blocks_independent());
    assert_eq!(decompress_frame_to_vec(&frame, &verifying()).unwrap(), data);
}

#[test]
fn c_legacy_frame_split_points_are_valid() {
    let Some(lz4_bin) = system_lz4() else {
        println!("SKIP c_legacy_frame_split_points_are_valid: system lz4 binary not found");
        return;
    };
    let dir = TempDir::new().unwrap();
    let data = content();
    let frame = c_compress(&lz4_bin, &dir, &data, &["-l"]);
    let parsed = parse_frame(&frame).unwrap();
    assert!(parsed.blocks_independent());

    let mut decoded_before = 0usize;
    for block in &parsed.blocks {
        let split = split_block(block).unwrap();
        let block_out = &data[decoded_before..decoded_before + split.decompressed_len()];
        for point in split.interior_points() {
            let suffix = lz4_flex::block::decompress(
                &block[point.compressed_offset..],
                block_out.len() - point.decompressed_offset,
            )
            .unwrap();
            assert_eq!(suffix, &block_out[point.decompressed_offset..], "{point:?}");
        }
        decoded_before += split.decompressed_len();
    }
    assert_eq!(decoded_before, data.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary decoding of C-written frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn c_frame_binary_decode() {
    let Some(lz4_bin) = system_lz4() else {
        println!("SKIP c_frame_binary_decode: system lz4 binary not found");
        return;
    };
    let dir = TempDir::new().unwrap();
    let data = content();

    for flags in [&["-l"][..], &["-B5"]] {
        let frame = c_compress(&lz4_bin, &dir, &data, flags);
        let input = dir.path().join("Image.lz4");
        let out = dir.path().join("kernel.bin");
        std::fs::write(&input, &frame).unwrap();

        let status = Command::new(lz4split_bin())
            .args(["--check", "--parallel", "-q", "-o"])
            .current_dir(dir.path())
            .status()
            .expect("spawn lz4split");
        assert!(status.success(), "{flags:?}: {status:?}");
        assert_eq!(std::fs::read(&out).unwrap(), data, "{flags:?}");
    }
}
