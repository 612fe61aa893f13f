//! Decision-by-decision replay of LF2 compressed streams.
//!
//! Parses the container header, then walks the compressed stream one
//! decision at a time, reconstructing the pixel bytes and reporting each
//! decision (with the dictionary state that preceded it) to a trace sink.
//!
//! # Architecture
//!
//! - [`parse_header`] validates magic and size and reads the palette
//! - [`Replayer`] is the single-pass state machine; [`Replayer::step`]
//!   consumes exactly one decision
//! - [`decode`], [`decode_with`], [`decode_file`] run a whole pass and
//!   return partial results alongside any truncation
//! - [`IndexedImage`] turns the stream-order output into a top-down image
//! - [`compare_decisions`] and [`decision_hash`] check two runs against
//!   each other
//!
//! Decoding holds no shared state: each call owns its dictionary, so
//! files can be decoded concurrently with no coordination.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod config;
pub mod decode;
pub mod hash;
pub mod header;
pub mod image;
pub mod replayer;

pub use compare::{compare_decisions, ComparisonReport, DecisionDivergence};
pub use config::{ConfigError, DecodeConfig, PixelLimit};
pub use decode::{decode, decode_file, decode_with, Replay};
pub use hash::{decision_hash, dictionary_hash, DecisionHasher};
pub use header::{compressed_stream, parse_header};
pub use image::IndexedImage;
pub use replayer::{Emitted, Replayer, Step};
