// config.rs: Format constants and runtime decode options.
//
// The numeric constants are fixed by the LZ4 block and frame formats and must
// not change; `DecodeOptions` carries the few knobs the host can turn.

// Legacy frame magic number (little-endian on disk: 02 21 4C 18).
pub const LEGACY_MAGIC: u32 = 0x184C_2102;

// Modern frame magic number (little-endian on disk: 04 22 4D 18).
pub const FRAME_MAGIC: u32 = 0x184D_2204;

// Minimum match length; the token / extension field encodes `match_length - MIN_MATCH`.
pub const MIN_MATCH: usize = 4;

// Width of the literal-length and match-length nibbles in a token.
pub const ML_BITS: u32 = 4;
pub const ML_MASK: u8 = (1 << ML_BITS) - 1;
pub const RUN_MASK: u8 = ML_MASK;

// Value of a sparse-integer byte that means "another byte follows".
pub const SPARSE_CONTINUE: u8 = 0xFF;

// High bit of a modern-frame block size: the block is stored uncompressed.
pub const BLOCK_UNCOMPRESSED_FLAG: u32 = 0x8000_0000;

// Input used by the driver when no file is named on the command line.
pub const DEFAULT_INPUT: &str = "Image.lz4";

// Initial display level (2 = normal messages).
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// Whether the default worker count is derived from the core count.
pub const MULTITHREAD: bool = cfg!(feature = "multithread");

// Upper bound on worker threads selectable with `--threads`.
pub const NB_WORKERS_MAX: usize = 200;

/// Options for frame parsing and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Verify header, block and content checksums and the declared content size.
    pub verify_checksums: bool,
    /// Worker threads used for parallel split-point decoding.
    pub nb_workers: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            verify_checksums: false,
            nb_workers: default_nb_workers(),
        }
    }
}

/// Returns the default number of decode workers.
///
/// With the `multithread` feature, uses the physical core count and spares a
/// fraction for the rest of the system. Without it, always 1.
pub fn default_nb_workers() -> usize {
    if MULTITHREAD {
        let nb_cores = num_cpus::get_physical();
        let spared = 1 + (nb_cores >> 3);
        if nb_cores <= spared {
            1
        } else {
            nb_cores - spared
        }
    } else {
        1
    }
}
