//! Per-file failures during a corpus scan.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use lf2_core::FormatError;

/// Why one file produced no summary.
///
/// Truncated streams are not errors here; they are summarised with their
/// partial counts and flagged in
/// [`FileSummary::truncation`](crate::FileSummary::truncation).
#[derive(Debug)]
pub enum CorpusError {
    /// The file could not be read.
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The file is larger than `max_file_bytes`.
    FileTooLarge {
        /// The file.
        path: PathBuf,
        /// Size on disk, or the bytes read before the ceiling was crossed
        /// when the file grew after its size was checked.
        len: u64,
        /// Configured ceiling.
        limit: usize,
    },
    /// The header is not a valid LF2 container.
    InvalidFormat {
        /// The file.
        path: PathBuf,
        /// What was wrong with it.
        source: FormatError,
    },
    /// The worker handling the file exited before replying.
    WorkerLost {
        /// The file.
        path: PathBuf,
    },
}

impl CorpusError {
    /// The file this error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::InvalidFormat { path, .. }
            | Self::WorkerLost { path } => path,
        }
    }
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::FileTooLarge { path, len, limit } => {
                write!(f, "{}: {len} bytes exceeds limit of {limit}", path.display())
            }
            Self::InvalidFormat { path, source } => write!(f, "{}: {source}", path.display()),
            Self::WorkerLost { path } => {
                write!(f, "{}: worker exited before replying", path.display())
            }
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_file() {
        let err = CorpusError::InvalidFormat {
            path: PathBuf::from("cg/c01.lf2"),
            source: FormatError::TooShort { len: 3 },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cg/c01.lf2: "), "{msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn worker_lost_has_no_source() {
        let err = CorpusError::WorkerLost {
            path: PathBuf::from("a.lf2"),
        };
        assert!(err.source().is_none());
        assert_eq!(err.path(), &PathBuf::from("a.lf2"));
    }
}
