//! Read side of the compressed stream.
//!
//! Every stored byte (control, literal, or match operand) is the bitwise
//! complement of its value. [`unmask`] is the only place that complement
//! is undone; [`MaskedStream`] applies it to each byte as it leaves the
//! buffer, so nothing above this layer ever sees a masked byte.

use crate::error::{StreamItem, TruncatedStream};

/// The value every stored byte is XOR'd with.
pub const STREAM_MASK: u8 = 0xFF;

/// Undo the stream mask on one byte.
///
/// The transform is stateless and its own inverse: `unmask(unmask(b)) == b`.
///
/// # Examples
///
/// ```
/// use lf2_core::unmask;
///
/// assert_eq!(unmask(0x00), 0xFF);
/// assert_eq!(unmask(0x03), 0xFC);
/// assert_eq!(unmask(unmask(0x5A)), 0x5A);
/// ```
#[inline]
pub const fn unmask(raw: u8) -> u8 {
    raw ^ STREAM_MASK
}

/// Cursor over a compressed stream that yields unmasked bytes.
///
/// Reads are all-or-nothing: a failed read leaves the position where it
/// was, so the offset in the returned [`TruncatedStream`] is the start of
/// the incomplete item.
#[derive(Clone, Debug)]
pub struct MaskedStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MaskedStream<'a> {
    /// Wrap the compressed bytes of one container, positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total stream length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stream holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Read and unmask one byte on behalf of `item`.
    pub fn read_byte(&mut self, item: StreamItem) -> Result<u8, TruncatedStream> {
        match self.data.get(self.pos) {
            Some(&raw) => {
                self.pos += 1;
                Ok(unmask(raw))
            }
            None => Err(self.truncated(item, 1)),
        }
    }

    /// Read and unmask a match operand pair `(upper, lower)`.
    pub fn read_pair(&mut self) -> Result<(u8, u8), TruncatedStream> {
        match self.data.get(self.pos..self.pos + 2) {
            Some(&[upper, lower]) => {
                self.pos += 2;
                Ok((unmask(upper), unmask(lower)))
            }
            _ => Err(self.truncated(StreamItem::MatchOperands, 2)),
        }
    }

    fn truncated(&self, item: StreamItem, needed: usize) -> TruncatedStream {
        TruncatedStream {
            offset: self.pos,
            item,
            needed,
            available: self.remaining(),
        }
    }
}
