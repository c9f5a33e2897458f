//! Binary entry point for `lz4split`.
//!
//! Maps the input file, parses its frame, decodes every block, reports the
//! split points of each block and optionally cross-checks them against the
//! reference decoder, decodes blocks in parallel across their split points,
//! and writes the decompressed content.
//!
//! Core errors propagate up to [`main`], which prints the error chain and
//! exits with status 1.

use std::fs::File;

use anyhow::{bail, ensure, Context};
use memmap2::Mmap;

use lz4split::block::{decompress_block, decompress_parallel, split_block};
use lz4split::cli::args::{parse_args, ParsedArgs};
use lz4split::cli::constants::{set_display_level, PROGRAM_NAME};
use lz4split::cli::verify;
use lz4split::config::DecodeOptions;
use lz4split::frame::{decompress_frame, parse_frame_with, Frame, FrameKind};
use lz4split::{displaylevel, displayout};

/// Execute the operation selected by the arguments.
fn run(args: &ParsedArgs) -> anyhow::Result<()> {
    set_display_level(args.display_level());
    let opts = args.decode_options()?;
    if args.verify && !verify::AVAILABLE {
        bail!("--verify requires {} to be built with the `verify` feature", PROGRAM_NAME);
    }

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    // SAFETY: the mapping is read-only and private; the input file is not
    // expected to be modified while it is mapped.
    let data = unsafe { Mmap::map(&file) }
        .with_context(|| format!("failed to map {}", args.input.display()))?;
    displaylevel!(3, "Mapped {} ({} bytes)\n", args.input.display(), data.len());

    let frame = parse_frame_with(&data, &opts)
        .with_context(|| format!("{}: invalid LZ4 frame", args.input.display()))?;
    describe_frame(&frame);

    if frame.blocks_independent() {
        for (index, block) in frame.blocks.iter().enumerate() {
            analyze_block(index, block, args, &opts)
                .with_context(|| format!("block {index}"))?;
        }
    } else {
        displaylevel!(2, "warning: frame blocks are linked; per-block split analysis skipped\n");
    }

    if let Some(path) = &args.output {
        let content = decompress_frame(&frame, &opts).context("failed to decompress frame")?;
        std::fs::write(path, &content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        displaylevel!(2, "Wrote {} bytes to {}\n", content.len(), path.display());
    }
    Ok(())
}

fn describe_frame(frame: &Frame<'_>) {
    match &frame.kind {
        FrameKind::Legacy => displaylevel!(3, "Legacy frame, {} blocks\n", frame.blocks.len()),
        FrameKind::Modern(desc) => {
            displaylevel!(
                3,
                "Frame: {} compressed / {} total blocks, independent={}, block checksums={}, content checksum={}\n",
                frame.blocks.len(),
                frame.segments.len(),
                desc.flags.block_independence,
                desc.flags.block_checksum,
                desc.flags.content_checksum
            );
            if let Some(size) = desc.content_size {
                displaylevel!(3, "Declared content size: {}\n", size);
            }
        }
    }
}

/// Decodes one independent block, finds its split points, and runs the
/// requested checks on them.
fn analyze_block(index: usize, block: &[u8], args: &ParsedArgs, opts: &DecodeOptions) -> anyhow::Result<()> {
    let decoded = decompress_block(block)?;
    if args.verify {
        verify::verify_block(block, &decoded)?;
    }

    displaylevel!(3, "Attempting to split input block of size: {}\n", block.len());
    let split = split_block(block)?;
    ensure!(
        split.decompressed_len() == decoded.len(),
        "split table covers {} bytes, block decodes to {}",
        split.decompressed_len(),
        decoded.len()
    );

    for point in split.interior_points() {
        if args.verify {
            verify::verify_split_point(block, &decoded, point)?;
        }
        if args.split {
            displayout!(
                "block {}: compressed offset {}, decompressed offset {}\n",
                index,
                point.compressed_offset,
                point.decompressed_offset
            );
        } else {
            displaylevel!(
                4,
                "Compressed bytes offset: {}, decompressed bytes offset: {}\n",
                point.compressed_offset,
                point.decompressed_offset
            );
        }
    }

    if args.parallel {
        let parallel = decompress_parallel(block, &split, opts.nb_workers)?;
        ensure!(parallel == decoded, "parallel decode differs from sequential decode");
    }

    displaylevel!(
        3,
        "Block {}: {} -> {} bytes, {} ops, {} split points\n",
        index,
        block.len(),
        decoded.len(),
        split.ops.len(),
        split.interior_points().count()
    );
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => match err.downcast_ref::<clap::Error>() {
            // --help / --version / usage errors: let clap print and pick the exit code.
            Some(clap_err) => clap_err.exit(),
            None => {
                eprintln!("{}: {:#}", PROGRAM_NAME, err);
                std::process::exit(1);
            }
        },
    };

    if let Err(err) = run(&args) {
        displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, err);
        std::process::exit(1);
    }
}
