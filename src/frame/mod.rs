//! LZ4 frame container: legacy (`0x184C2102`) and modern (`0x184D2204`).
//!
//! [`parse`] turns a buffer into a [`Frame`] whose blocks borrow the input;
//! [`decode`] decompresses a whole frame.

pub mod decode;
pub mod parse;
pub mod types;

pub use decode::{decompress_frame, decompress_frame_to_vec};
pub use parse::{parse_frame, parse_frame_with};
pub use types::{BlockKind, Frame, FrameBlock, FrameDescriptor, FrameFlags, FrameKind};
