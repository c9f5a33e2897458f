//! Command-line interface for the `lz4split` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, the shared `DISPLAY_LEVEL` atomic and the display macros. |
//! | [`args`]      | `ParsedArgs`: clap-derived options and their conversion to `DecodeOptions`. |
//! | [`verify`]    | Cross-checks against the reference decoder (`verify` feature). |

pub mod args;
pub mod constants;
pub mod verify;
