//! Core types for replaying LF2 image compression decisions.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! state the replayer threads through a decode pass and the contract it
//! exposes to analysis code:
//!
//! - [`CircularDictionary`]: the 4096-byte window matches copy from
//! - [`FlagCursor`]: one control byte fanned out into 8 decision bits
//! - [`MaskedStream`]: the compressed stream with the `XOR 0xFF` mask
//!   removed at the read boundary
//! - [`Decision`] and [`Container`]: immutable values produced by decoding
//! - [`TraceSink`], [`DecisionTrace`], [`DecisionLog`]: where decisions go
//!
//! # Format
//!
//! ```text
//! [MAGIC "LEAF256\0"] [x u16] [y u16] [width u16] [height u16] ...
//! [transparent @0x12] ... [palette count @0x16] [pad]
//! [palette: count * (B, G, R)]
//! [control] [op] [op] ... [control] [op] ...
//! ```
//!
//! Every byte after the palette is stored complemented.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decision;
pub mod dictionary;
pub mod error;
pub mod flags;
pub mod stream;
pub mod trace;
pub mod types;

pub use decision::{Decision, DecisionKind};
pub use dictionary::{CircularDictionary, DictionarySnapshot};
pub use error::{DecodeError, FormatError, StreamItem, TruncatedStream};
pub use flags::FlagCursor;
pub use stream::{unmask, MaskedStream};
pub use trace::{DecisionLog, DecisionTrace, LogEntry, TraceRecord, TraceSink};
pub use types::{Container, Rgb};

/// Magic tag at the start of every LF2 container.
pub const MAGIC: [u8; 8] = *b"LEAF256\0";

/// Size of the fixed header; the palette starts here.
pub const HEADER_LEN: usize = 0x18;

/// Smallest byte count a container can have and still carry a header.
pub const MIN_CONTAINER_LEN: usize = 24;

/// Bytes per palette entry (stored B, G, R).
pub const PALETTE_ENTRY_LEN: usize = 3;

/// Capacity of the circular dictionary.
pub const DICTIONARY_SIZE: usize = 0x1000;

/// Mask applied to every dictionary index.
pub const DICTIONARY_MASK: usize = DICTIONARY_SIZE - 1;

/// Value every dictionary byte holds before the first write.
pub const DICTIONARY_FILL: u8 = 0x20;

/// Cursor position of a fresh dictionary.
pub const DICTIONARY_START: usize = 0x0fee;

/// Shortest run a match can copy.
pub const MIN_MATCH_LEN: usize = 3;

/// Longest run a match can copy (`0x0F + 3`).
pub const MAX_MATCH_LEN: usize = 18;
