//! Error types for container parsing and stream replay.
//!
//! Two families exist. [`FormatError`] covers everything that makes a file
//! unusable before decoding starts. [`TruncatedStream`] is raised mid-decode
//! and always travels alongside whatever was decoded before it.

use std::error::Error;
use std::fmt;

/// The container header or palette cannot be read.
///
/// Fatal to the whole file: no partial result is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer bytes than the fixed header occupies.
    TooShort {
        /// Bytes actually present.
        len: usize,
    },
    /// The first 8 bytes are not `LEAF256\0`.
    BadMagic {
        /// The tag found instead.
        found: [u8; 8],
    },
    /// The palette table runs past the end of the file.
    PaletteTruncated {
        /// Declared palette entry count.
        entries: u8,
        /// Bytes available after the header.
        available: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "container is {len} bytes, header needs {}", crate::MIN_CONTAINER_LEN)
            }
            Self::BadMagic { found } => {
                write!(f, "invalid magic b\"{}\" (expected b\"LEAF256\\0\")", found.escape_ascii())
            }
            Self::PaletteTruncated { entries, available } => write!(
                f,
                "palette of {entries} entries needs {} bytes, only {available} present",
                *entries as usize * crate::PALETTE_ENTRY_LEN
            ),
        }
    }
}

impl Error for FormatError {}

/// Which part of the stream was being read when it ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamItem {
    /// A control byte gating the next 8 decisions.
    ControlByte,
    /// The single operand of a `Direct` decision.
    Literal,
    /// The two operands of a `Match` decision.
    MatchOperands,
}

impl StreamItem {
    /// Number of stream bytes this item occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::ControlByte | Self::Literal => 1,
            Self::MatchOperands => 2,
        }
    }
}

impl fmt::Display for StreamItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlByte => f.write_str("control byte"),
            Self::Literal => f.write_str("literal"),
            Self::MatchOperands => f.write_str("match operand pair"),
        }
    }
}

/// The compressed stream ended before a required item was complete.
///
/// Recoverable at the corpus level: the decode call that raises it still
/// returns the partial trace and output built so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TruncatedStream {
    /// Stream offset where the item should have started.
    pub offset: usize,
    /// What was being read.
    pub item: StreamItem,
    /// Bytes the item needs.
    pub needed: usize,
    /// Bytes that were left.
    pub available: usize,
}

impl fmt::Display for TruncatedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stream truncated at offset {}: {} needs {} byte(s), {} left",
            self.offset, self.item, self.needed, self.available
        )
    }
}

impl Error for TruncatedStream {}

/// Either error family, for callers that handle a file in one shot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Header or palette rejected.
    InvalidFormat(FormatError),
    /// Stream ended early.
    Truncated(TruncatedStream),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(e) => write!(f, "invalid format: {e}"),
            Self::Truncated(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFormat(e) => Some(e),
            Self::Truncated(e) => Some(e),
        }
    }
}

impl From<FormatError> for DecodeError {
    fn from(e: FormatError) -> Self {
        Self::InvalidFormat(e)
    }
}

impl From<TruncatedStream> for DecodeError {
    fn from(e: TruncatedStream) -> Self {
        Self::Truncated(e)
    }
}
