//! Command-line argument parsing for `lz4split`.
//!
//! [`parse_args`] reads `std::env::args()`; [`parse_args_from`] takes an
//! explicit list so the parser can be exercised from tests.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};

use crate::cli::constants::{DEFAULT_OUTPUT, PROGRAM_NAME};
use crate::config::{default_nb_workers, DecodeOptions, DEFAULT_INPUT, DISPLAY_LEVEL_DEFAULT, NB_WORKERS_MAX};

/// Environment variable consulted when `--threads` is 0.
pub const NB_WORKERS_ENV: &str = "LZ4SPLIT_NBWORKERS";

/// Decode an LZ4 frame and report the split points of each block.
#[derive(Debug, Clone, Parser)]
#[command(name = PROGRAM_NAME, version = crate::LZ4SPLIT_VERSION_STRING, about)]
pub struct ParsedArgs {
    /// LZ4 file (legacy or modern frame).
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Write the decompressed content to PATH.
    #[arg(short, long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT)]
    pub output: Option<PathBuf>,

    /// Print the split points of every block.
    #[arg(long)]
    pub split: bool,

    /// Decode each block in parallel across its split points.
    #[arg(long)]
    pub parallel: bool,

    /// Cross-check every block and split point against the reference decoder.
    #[arg(long)]
    pub verify: bool,

    /// Verify frame header, block and content checksums.
    #[arg(long)]
    pub check: bool,

    /// Worker threads for parallel decoding (0 = auto).
    #[arg(short = 'T', long, value_name = "N", default_value_t = 0)]
    pub threads: usize,

    /// More output (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl ParsedArgs {
    /// Display level implied by `-v` / `-q`.
    pub fn display_level(&self) -> u32 {
        (DISPLAY_LEVEL_DEFAULT + self.verbose as u32).saturating_sub(self.quiet as u32)
    }

    /// Decode options built from the arguments.
    pub fn decode_options(&self) -> anyhow::Result<DecodeOptions> {
        if self.threads > NB_WORKERS_MAX {
            bail!("bad usage: --threads {} exceeds the maximum of {}", self.threads, NB_WORKERS_MAX);
        }
        let nb_workers = match self.threads {
            0 => init_nb_workers().unwrap_or_else(default_nb_workers),
            n => n,
        };
        Ok(DecodeOptions { verify_checksums: self.check, nb_workers: nb_workers.min(NB_WORKERS_MAX) })
    }
}

/// Worker count from the `LZ4SPLIT_NBWORKERS` environment variable, if set.
pub fn init_nb_workers() -> Option<usize> {
    init_nb_workers_from(std::env::var(NB_WORKERS_ENV).ok().as_deref())
}

/// Parses a raw `LZ4SPLIT_NBWORKERS` value; `None` if absent, empty or not a
/// positive decimal number.
pub fn init_nb_workers_from(env_val: Option<&str>) -> Option<usize> {
    env_val?.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Parse `std::env::args()`.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    parse_args_from(std::env::args())
}

/// Parse an explicit argument list; the first item is the program name.
pub fn parse_args_from<I, T>(argv: I) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ParsedArgs::try_parse_from(argv).context("bad usage")
}
