// e2e/cli.rs: black-box tests of the `lz4split` binary.
//
// Frames are produced with the reference encoder, written to a temp dir, and
// fed to the binary through std::process::Command. Covers decoding to a file,
// split-point reporting, parallel decoding, the reference cross-check, and the
// exit status on bad input.

#[path = "../tests/common/mod.rs"]
mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use common::{legacy_frame, modern_frame, random_bytes, sample_text};
use lz4_flex::frame::{BlockMode, BlockSize, FrameInfo};
use tempfile::TempDir;

fn lz4split_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lz4split"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(lz4split_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run lz4split")
}

/// Text with an incompressible stretch in the middle, so blocks have
/// interior split points.
fn mixed_content() -> Vec<u8> {
    let mut data = sample_text(120_000);
    data.extend_from_slice(&random_bytes(40_000, 17));
    data.extend_from_slice(&sample_text(60_000));
    data
}

fn write_input(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Parses `block N: compressed offset C, decompressed offset D` lines.
fn split_lines(stdout: &[u8]) -> Vec<(usize, usize, usize)> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("block ")?;
            let (block, rest) = rest.split_once(": compressed offset ")?;
            let (c, d) = rest.split_once(", decompressed offset ")?;
            Some((block.parse().ok()?, c.parse().ok()?, d.parse().ok()?))
        })
        .collect()
}

// ── 1. Decoding to a file ────────────────────────────────────────────────────

#[test]
fn legacy_frame_decodes_to_output_file() {
    let dir = TempDir::new().unwrap();
    let data = mixed_content();
    let input = write_input(&dir, "in.lz4", &legacy_frame(&data, 1 << 20));
    let out = dir.path().join("out.bin");

    let output = run_in(dir.path(), &[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn modern_frame_with_checks_decodes() {
    let dir = TempDir::new().unwrap();
    let data = mixed_content();
    let info = FrameInfo::new()
        .block_size(BlockSize::Max256KB)
        .block_checksums(true)
        .content_checksum(true)
        .content_size(Some(data.len() as u64));
    let input = write_input(&dir, "in.lz4", &modern_frame(&data, info));
    let out = dir.path().join("out.bin");

    let output = run_in(
        dir.path(),
        &["--check", "--parallel", "-T", "2", input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn output_flag_without_path_writes_default_file() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(20_000);
    write_input(&dir, "Image.lz4", &legacy_frame(&data, 1 << 20));

    // No input named: the default input in the working directory is used.
    let output = run_in(dir.path(), &["-o"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(dir.path().join("kernel.bin")).unwrap(), data);
}

#[test]
fn linked_frame_skips_analysis_but_decodes() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(200_000);
    let info = FrameInfo::new().block_size(BlockSize::Max64KB).block_mode(BlockMode::Linked);
    let input = write_input(&dir, "in.lz4", &modern_frame(&data, info));
    let out = dir.path().join("out.bin");

    let output = run_in(dir.path(), &["--split", input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("linked"));
    assert!(split_lines(&output.stdout).is_empty());
    assert_eq!(fs::read(&out).unwrap(), data);
}

// ── 2. Split-point reporting ─────────────────────────────────────────────────

#[test]
fn reported_split_points_decode_independently() {
    let dir = TempDir::new().unwrap();
    let data = mixed_content();
    let block = lz4_flex::block::compress(&data);
    let mut frame = 0x184C_2102u32.to_le_bytes().to_vec();
    frame.extend_from_slice(&(block.len() as u32).to_le_bytes());
    frame.extend_from_slice(&block);
    let input = write_input(&dir, "in.lz4", &frame);

    let output = run_in(dir.path(), &["--split", input.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let points = split_lines(&output.stdout);
    assert!(!points.is_empty(), "expected interior split points");
    for (index, c, d) in points {
        assert_eq!(index, 0);
        let suffix = lz4_flex::block::decompress(&block[c..], data.len() - d).unwrap();
        assert_eq!(suffix, &data[d..], "split at ({c}, {d})");
    }
}

#[test]
fn quiet_split_prints_only_points() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.lz4", &legacy_frame(&mixed_content(), 1 << 20));

    let output = run_in(dir.path(), &["-qq", "--split", input.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().all(|l| l.starts_with("block 0: ")));
}

// ── 3. Reference cross-check ─────────────────────────────────────────────────

#[test]
fn verify_flag_depends_on_feature() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.lz4", &legacy_frame(&mixed_content(), 64 * 1024));

    let output = run_in(dir.path(), &["--verify", input.to_str().unwrap()]);
    if cfg!(feature = "verify") {
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    } else {
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("verify"));
    }
}

// ── 4. Failures ──────────────────────────────────────────────────────────────

#[test]
fn bad_magic_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.lz4", b"this is not an lz4 frame");

    let output = run_in(dir.path(), &[input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized frame magic"));
}

#[test]
fn missing_input_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["does-not-exist.lz4"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open"));
}

#[test]
fn corrupted_content_checksum_fails_with_check() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(30_000);
    let mut frame = modern_frame(&data, FrameInfo::new().content_checksum(true));
    let last = frame.len() - 1;
    frame[last] ^= 0xFF;
    let input = write_input(&dir, "in.lz4", &frame);
    let out = dir.path().join("out.bin");

    let unchecked = run_in(dir.path(), &[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(unchecked.status.success());

    let checked = run_in(dir.path(), &["--check", input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert_eq!(checked.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&checked.stderr).contains("content checksum"));
}

#[test]
fn unknown_option_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["--no-such-flag"]);
    assert!(!output.status.success());
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    let output = run_in(dir.path(), &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(lz4split::LZ4SPLIT_VERSION_STRING));
}
