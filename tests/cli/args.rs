// Integration tests for src/cli/args.rs: clap parsing and the decode
// options derived from it.

use std::path::PathBuf;

use lz4split::cli::args::{init_nb_workers_from, parse_args_from, ParsedArgs, NB_WORKERS_ENV};
use lz4split::config::{DISPLAY_LEVEL_DEFAULT, NB_WORKERS_MAX};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse(argv: &[&str]) -> ParsedArgs {
    parse_args_from(std::iter::once("lz4split").chain(argv.iter().copied()))
        .expect("parse should succeed")
}

fn parse_err(argv: &[&str]) -> String {
    parse_args_from(std::iter::once("lz4split").chain(argv.iter().copied()))
        .expect_err("expected parse error")
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Positional input and --output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_args_uses_default_input() {
    let a = parse(&[]);
    assert_eq!(a.input, PathBuf::from("Image.lz4"));
    assert_eq!(a.output, None);
    assert_eq!(a.threads, 0);
}

#[test]
fn explicit_input_and_output() {
    let a = parse(&["boot/Image.lz4", "--output", "/tmp/k.bin"]);
    assert_eq!(a.input, PathBuf::from("boot/Image.lz4"));
    assert_eq!(a.output, Some(PathBuf::from("/tmp/k.bin")));
}

#[test]
fn bare_output_flag_defaults_to_kernel_bin() {
    assert_eq!(parse(&["--output"]).output, Some(PathBuf::from("kernel.bin")));
    assert_eq!(parse(&["-o", "--split"]).output, Some(PathBuf::from("kernel.bin")));
}

#[test]
fn mode_flags() {
    let a = parse(&["--split", "--parallel", "--verify", "--check", "x.lz4"]);
    assert!(a.split && a.parallel && a.verify && a.check);
}

// ─────────────────────────────────────────────────────────────────────────────
// Verbosity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbosity_adjusts_display_level() {
    assert_eq!(parse(&["-v"]).display_level(), DISPLAY_LEVEL_DEFAULT + 1);
    assert_eq!(parse(&["-v", "-v"]).display_level(), DISPLAY_LEVEL_DEFAULT + 2);
    assert_eq!(parse(&["-q"]).display_level(), DISPLAY_LEVEL_DEFAULT - 1);
    assert_eq!(parse(&["-qqqqq"]).display_level(), 0);
}

#[test]
fn verbose_and_quiet_conflict() {
    assert!(parse_err(&["-v", "-q"]).contains("bad usage"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode options
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn explicit_threads_win() {
    let opts = parse(&["-T", "7"]).decode_options().unwrap();
    assert_eq!(opts.nb_workers, 7);
    assert!(!opts.verify_checksums);
    let opts = parse(&["--threads=2", "--check"]).decode_options().unwrap();
    assert_eq!(opts.nb_workers, 2);
    assert!(opts.verify_checksums);
}

#[test]
fn auto_threads_is_at_least_one() {
    let opts = parse(&[]).decode_options().unwrap();
    assert!(opts.nb_workers >= 1);
    assert!(opts.nb_workers <= NB_WORKERS_MAX);
}

#[test]
fn too_many_threads_is_rejected() {
    let err = parse(&["-T", "201"]).decode_options().unwrap_err();
    assert!(err.to_string().contains("exceeds"));
    assert!(parse(&["-T", "200"]).decode_options().is_ok());
}

#[test]
fn worker_env_value_parsing() {
    assert_eq!(NB_WORKERS_ENV, "LZ4SPLIT_NBWORKERS");
    assert_eq!(init_nb_workers_from(Some("12")), Some(12));
    assert_eq!(init_nb_workers_from(Some("")), None);
    assert_eq!(init_nb_workers_from(Some("-3")), None);
}

#[test]
fn non_numeric_threads_is_usage_error() {
    assert!(parse_err(&["-T", "lots"]).contains("bad usage"));
}
