//! Batch replay of LF2 containers across a directory tree.
//!
//! [`discover`] collects `.lf2` paths; [`scan_corpus`] replays them on a
//! worker pool and returns a [`CorpusReport`] with one outcome per path.
//! Workers keep only running counts and a decision hash per file, never a
//! full trace, so memory stays flat regardless of corpus size.
//!
//! # Examples
//!
//! ```no_run
//! use lf2_corpus::{discover, scan_corpus, CorpusConfig};
//!
//! let paths = discover("game/cg").unwrap();
//! let report = scan_corpus(paths, &CorpusConfig::default()).unwrap();
//! for (path, outcome) in &report {
//!     match outcome {
//!         Ok(s) => println!("{}: {} decisions", path.display(), s.decisions()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod discover;
pub mod error;
pub mod pool;
pub mod report;
pub mod summary;

pub use config::{ConfigError, CorpusConfig};
pub use discover::{discover, is_lf2, LF2_EXTENSION};
pub use error::CorpusError;
pub use pool::scan_corpus;
pub use report::{CorpusReport, FileOutcome};
pub use summary::{scan_file, summarize_bytes, FileSummary, SummarySink};
