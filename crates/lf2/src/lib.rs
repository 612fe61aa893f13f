//! LF2: decision-level replay of LEAF256 compressed images.
//!
//! This is the facade crate that re-exports the public API from the LF2
//! sub-crates. For most users, adding `lf2` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lf2::prelude::*;
//!
//! // A 2x1 image: one control byte (all literals), then two literals.
//! let mut file = vec![0u8; 0x18];
//! file[..8].copy_from_slice(b"LEAF256\0");
//! file[0x0C] = 2; // width
//! file[0x0E] = 1; // height
//! file.extend_from_slice(&[0x00, !0x10, !0x20]);
//!
//! let (container, replay) =
//!     decode_file(&file, &DecodeConfig::default(), DecisionTrace::new()).unwrap();
//! assert!(replay.is_complete());
//! assert_eq!(replay.output, [0x10, 0x20]);
//!
//! let first = &replay.trace.records()[0];
//! assert_eq!(first.decision, Decision::Direct { value: 0x10 });
//! assert_eq!(first.before.cursor(), 0x0fee);
//! assert_eq!(IndexedImage::from_output(&container, &replay.output).pixels, [0x10, 0x20]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lf2-core` | Container, decisions, dictionary, stream primitives, sinks, errors |
//! | [`replay`] | `lf2-replay` | Header parsing, the replayer, image reconstruction, comparison |
//! | [`corpus`] | `lf2-corpus` | Directory discovery and the batch worker pool |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model and stream primitives (`lf2-core`).
///
/// Contains [`types::Container`], [`types::Decision`], the
/// [`types::CircularDictionary`], and the [`types::TraceSink`] trait with
/// its provided sinks.
pub use lf2_core as types;

/// Header parsing and replay (`lf2-replay`).
///
/// Step one decision at a time with [`replay::Replayer`], or run a whole
/// pass with [`replay::decode`] and friends.
pub use lf2_replay as replay;

/// Batch processing (`lf2-corpus`).
///
/// Find files with [`corpus::discover`] and replay them in parallel with
/// [`corpus::scan_corpus`].
pub use lf2_corpus as corpus;

/// Common imports for typical LF2 usage.
///
/// ```rust
/// use lf2::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use lf2_core::{
        CircularDictionary, Container, Decision, DecisionKind, DictionarySnapshot, Rgb,
    };

    // Sinks
    pub use lf2_core::{DecisionLog, DecisionTrace, TraceRecord, TraceSink};

    // Errors
    pub use lf2_core::{DecodeError, FormatError, StreamItem, TruncatedStream};

    // Replay
    pub use lf2_replay::{
        compare_decisions, decision_hash, decode, decode_file, decode_with, parse_header,
        DecodeConfig, IndexedImage, PixelLimit, Replay, Replayer,
    };

    // Corpus
    pub use lf2_corpus::{discover, scan_corpus, CorpusConfig, CorpusReport, FileSummary};
}
