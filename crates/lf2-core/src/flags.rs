//! Control-byte demultiplexing.
//!
//! One control byte selects the kind of the next eight decisions, most
//! significant bit first. A set bit means [`DecisionKind::Direct`], a clear
//! bit means [`DecisionKind::Match`].

use crate::decision::DecisionKind;
use crate::error::{StreamItem, TruncatedStream};
use crate::stream::MaskedStream;

/// Bits carried by one control byte.
pub const BITS_PER_CONTROL: u8 = 8;

/// Tracks the active control byte and how many of its bits are unread.
///
/// A new control byte is pulled from the stream only when the previous
/// one is fully consumed.
///
/// # Examples
///
/// ```
/// use lf2_core::{DecisionKind, FlagCursor, MaskedStream};
///
/// // Stored 0x3F unmasks to 0b1100_0000.
/// let raw = [0x3F];
/// let mut stream = MaskedStream::new(&raw);
/// let mut flags = FlagCursor::new();
///
/// assert_eq!(flags.next_kind(&mut stream).unwrap(), DecisionKind::Direct);
/// assert_eq!(flags.next_kind(&mut stream).unwrap(), DecisionKind::Direct);
/// assert_eq!(flags.next_kind(&mut stream).unwrap(), DecisionKind::Match);
/// assert_eq!(flags.remaining(), 5);
/// assert_eq!(stream.position(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagCursor {
    control: u8,
    remaining: u8,
}

impl FlagCursor {
    /// A cursor with no control byte loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next decision bit, loading a control byte from `stream` if needed.
    ///
    /// Fails with a [`StreamItem::ControlByte`] truncation when a load is
    /// required and the stream is empty; the cursor is left unchanged.
    pub fn next_bit(&mut self, stream: &mut MaskedStream<'_>) -> Result<u8, TruncatedStream> {
        if self.remaining == 0 {
            self.control = stream.read_byte(StreamItem::ControlByte)?;
            self.remaining = BITS_PER_CONTROL;
        }
        self.remaining -= 1;
        Ok((self.control >> self.remaining) & 1)
    }

    /// Next decision kind. See [`next_bit`](Self::next_bit).
    pub fn next_kind(
        &mut self,
        stream: &mut MaskedStream<'_>,
    ) -> Result<DecisionKind, TruncatedStream> {
        self.next_bit(stream).map(DecisionKind::from_bit)
    }

    /// The kind the next call would return without loading, if a control
    /// byte is still active.
    pub fn peek_kind(&self) -> Option<DecisionKind> {
        (self.remaining > 0).then(|| DecisionKind::from_bit((self.control >> (self.remaining - 1)) & 1))
    }

    /// Unread bits of the active control byte (`0..=8`).
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// The active control byte, already unmasked.
    pub fn control(&self) -> u8 {
        self.control
    }
}
