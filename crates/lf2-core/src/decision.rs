//! Compressor decisions recovered from the stream.

use crate::{DICTIONARY_MASK, MAX_MATCH_LEN, MIN_MATCH_LEN};

/// What a control bit selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    /// Bit 1: emit one literal byte.
    Direct,
    /// Bit 0: copy a run out of the dictionary.
    Match,
}

impl DecisionKind {
    /// Map a control bit to its kind. Only the low bit is looked at.
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 {
            Self::Direct
        } else {
            Self::Match
        }
    }

    /// The control bit that selects this kind.
    pub const fn bit(self) -> u8 {
        match self {
            Self::Direct => 1,
            Self::Match => 0,
        }
    }

    /// Stream bytes following the control bit for this kind.
    pub const fn operand_len(self) -> usize {
        match self {
            Self::Direct => 1,
            Self::Match => 2,
        }
    }
}

/// One compressor choice, in stream order.
///
/// `Match` values decoded from a stream always satisfy
/// `position <= 0x0FFF` and `3 <= length <= 18`.
///
/// # Examples
///
/// ```
/// use lf2_core::Decision;
///
/// // upper = 0x50: length nibble 0, position low nibble 5.
/// // lower = 0x12: position high byte.
/// let d = Decision::from_operands(0x50, 0x12);
/// assert_eq!(d, Decision::Match { position: 0x125, length: 3 });
/// assert_eq!(d.operands(), (0x50, 0x12));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// A literal output byte.
    Direct {
        /// The unmasked byte value.
        value: u8,
    },
    /// A back-reference into the dictionary.
    Match {
        /// Absolute dictionary index of the first source byte.
        position: u16,
        /// Number of bytes copied.
        length: u8,
    },
}

impl Decision {
    /// Decode an unmasked match operand pair.
    ///
    /// `length = (upper & 0x0F) + 3` and
    /// `position = ((upper >> 4) + (lower << 4)) & 0x0FFF`.
    pub fn from_operands(upper: u8, lower: u8) -> Self {
        let length = (upper & 0x0F) + MIN_MATCH_LEN as u8;
        let position = ((upper >> 4) as usize + ((lower as usize) << 4)) & DICTIONARY_MASK;
        Self::Match {
            position: position as u16,
            length,
        }
    }

    /// A match, if `position` and `length` are representable.
    pub fn checked_match(position: usize, length: usize) -> Option<Self> {
        if position > DICTIONARY_MASK || !(MIN_MATCH_LEN..=MAX_MATCH_LEN).contains(&length) {
            return None;
        }
        Some(Self::Match {
            position: position as u16,
            length: length as u8,
        })
    }

    /// The unmasked stream bytes that encode this decision.
    ///
    /// For `Direct` this is `(value, 0)` and only the first byte is used.
    /// Out-of-range match fields are masked into range.
    pub fn operands(&self) -> (u8, u8) {
        match *self {
            Self::Direct { value } => (value, 0),
            Self::Match { position, length } => {
                let position = position as usize & DICTIONARY_MASK;
                let len_nibble = length.saturating_sub(MIN_MATCH_LEN as u8) & 0x0F;
                let upper = len_nibble | (((position & 0x0F) as u8) << 4);
                let lower = (position >> 4) as u8;
                (upper, lower)
            }
        }
    }

    /// Which control bit selected this decision.
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::Direct { .. } => DecisionKind::Direct,
            Self::Match { .. } => DecisionKind::Match,
        }
    }

    /// Output bytes this decision produces when fully applied.
    pub fn emitted_len(&self) -> usize {
        match self {
            Self::Direct { .. } => 1,
            Self::Match { length, .. } => *length as usize,
        }
    }

    /// Whether this is a literal.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct { .. })
    }
}
