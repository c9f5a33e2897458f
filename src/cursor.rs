//! Bounds-checked read cursor over a borrowed byte slice.
//!
//! [`ByteCursor`] never copies the buffer it reads: every slice it hands out
//! borrows the original input for `'a`, so decoded literals and frame blocks
//! point straight into the caller's (possibly memory-mapped) data.
//!
//! A failed read leaves the cursor where it was and reports
//! [`Lz4Error::OutOfBounds`].

use crate::config::SPARSE_CONTINUE;
use crate::error::{Lz4Error, Result};

/// Non-owning little-endian reader. Invariant: `offset <= data.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// `true` once every byte has been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// The whole underlying slice, independent of the current position.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.out_of_bounds(n));
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads an LZ4 length extension: bytes are summed until one is not `0xFF`.
    ///
    /// On failure the cursor is restored to where the integer started.
    pub fn read_sparse_int(&mut self) -> Result<usize> {
        let start = self.offset;
        let mut total = 0usize;
        loop {
            let byte = match self.read_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.offset = start;
                    return Err(e);
                }
            };
            total += byte as usize;
            if byte != SPARSE_CONTINUE {
                return Ok(total);
            }
        }
    }

    /// An independent cursor over `data[offset..offset + n]`.
    ///
    /// `offset` is absolute within the underlying slice; the parent cursor is
    /// not advanced.
    pub fn sub_cursor(&self, offset: usize, n: usize) -> Result<ByteCursor<'a>> {
        let end = offset.checked_add(n).filter(|&end| end <= self.data.len());
        match end {
            Some(end) => Ok(ByteCursor::new(&self.data[offset..end])),
            None => Err(Lz4Error::OutOfBounds {
                offset,
                requested: n,
                available: self.data.len().saturating_sub(offset),
            }),
        }
    }

    fn out_of_bounds(&self, requested: usize) -> Lz4Error {
        Lz4Error::OutOfBounds {
            offset: self.offset,
            requested,
            available: self.remaining(),
        }
    }
}

/// Number of extension bytes [`ByteCursor::read_sparse_int`] consumes for a
/// field whose full value (nibble plus extension) is `n`.
///
/// Values below 15 fit in the nibble; 15..=269 need one byte, and so on.
pub const fn sparse_int_extra_bytes(n: usize) -> usize {
    if n < 15 {
        return 0;
    }
    (n - 14).div_ceil(255)
}
