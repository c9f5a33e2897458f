//! Lazy iteration over the operations of one compressed block.

use crate::block::op::Op;
use crate::cursor::ByteCursor;
use crate::error::Result;

/// Iterator yielding each [`Op`] of a block until the end-of-block sentinel.
///
/// The sequence is single-pass but cheap to recreate: building a new one over
/// the same slice restarts decoding from the beginning. A decode error is
/// yielded once; the iterator is fused afterwards.
#[derive(Debug, Clone)]
pub struct OpSequence<'a> {
    cursor: ByteCursor<'a>,
    done: bool,
}

impl<'a> OpSequence<'a> {
    pub fn new(block: &'a [u8]) -> Self {
        Self::from_cursor(ByteCursor::new(block))
    }

    pub fn from_cursor(cursor: ByteCursor<'a>) -> Self {
        OpSequence { cursor, done: false }
    }

    /// Compressed bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for OpSequence<'a> {
    type Item = Result<Op<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match Op::decode(&mut self.cursor) {
            Ok(op) if op.is_terminal() => {
                self.done = true;
                None
            }
            Ok(op) => Some(Ok(op)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for OpSequence<'_> {}

/// Decodes every op of `block` into a vector.
pub fn collect_ops(block: &[u8]) -> Result<Vec<Op<'_>>> {
    OpSequence::new(block).collect()
}
