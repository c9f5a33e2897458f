//! Single LZ4 sequence ("operation") decoding.
//!
//! An LZ4 block is a run of sequences, each made of a token byte, an optional
//! literal-length extension, the literals, a 16-bit little-endian offset and an
//! optional match-length extension:
//!
//! ```text
//!  token  [lit ext..]  literals..  offset(LE16)  [match ext..]
//!  LLLLMMMM
//! ```
//!
//! The last sequence of a block carries literals only; it ends right after
//! its literal run.

use core::fmt;

use crate::config::{MIN_MATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::cursor::{sparse_int_extra_bytes, ByteCursor};
use crate::error::Result;

/// One decoded sequence: emit `literals`, then copy `match_length` bytes
/// starting `offset` bytes back from the current output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Op<'a> {
    pub literals: &'a [u8],
    pub offset: usize,
    pub match_length: usize,
}

impl<'a> Op<'a> {
    /// The end-of-block sentinel: no literals, no match.
    pub const TERMINAL: Op<'static> = Op { literals: &[], offset: 0, match_length: 0 };

    /// Decodes the next sequence from `cursor`.
    ///
    /// Returns [`Op::TERMINAL`] when the cursor is already exhausted, and a
    /// literals-only op (offset and match length zero) when the cursor runs
    /// out right after the literal run.
    pub fn decode(cursor: &mut ByteCursor<'a>) -> Result<Op<'a>> {
        if cursor.at_end() {
            return Ok(Op::default());
        }
        let token = cursor.read_u8()?;

        let mut literal_length = (token >> ML_BITS) as usize;
        if literal_length == RUN_MASK as usize {
            literal_length += cursor.read_sparse_int()?;
        }
        let literals = cursor.read_bytes(literal_length)?;
        if cursor.at_end() {
            return Ok(Op { literals, offset: 0, match_length: 0 });
        }

        let offset = cursor.read_u16()? as usize;
        let mut match_length = (token & ML_MASK) as usize;
        if match_length == ML_MASK as usize {
            match_length += cursor.read_sparse_int()?;
        }
        match_length += MIN_MATCH;

        Ok(Op { literals, offset, match_length })
    }

    /// `true` for the end-of-block sentinel.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.literals.is_empty() && self.match_length == 0
    }

    #[inline]
    pub fn has_match(&self) -> bool {
        self.match_length > 0
    }

    /// Number of compressed bytes this op occupies in the block.
    ///
    /// A literals-only tail has no offset or match-length bytes.
    pub fn encoded_size(&self) -> usize {
        let literal_length = self.literals.len();
        let literal_part = 1 + sparse_int_extra_bytes(literal_length) + literal_length;
        if !self.has_match() {
            return literal_part;
        }
        literal_part + 2 + sparse_int_extra_bytes(self.match_length - MIN_MATCH)
    }

    /// Number of output bytes this op produces.
    #[inline]
    pub fn decoded_size(&self) -> usize {
        self.literals.len() + self.match_length
    }
}

impl fmt::Display for Op<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ literal_length: {}, offset: {}, match_length: {} }}",
            self.literals.len(),
            self.offset,
            self.match_length
        )
    }
}
