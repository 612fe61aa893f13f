//! Batch configuration, validation, and worker-count resolution.

use std::error::Error;
use std::fmt;

use lf2_replay::DecodeConfig;

/// Upper bound on auto-detected workers.
const AUTO_WORKER_CAP: usize = 32;
/// Upper bound on an explicit worker count.
const EXPLICIT_WORKER_CAP: usize = 64;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`CorpusConfig::validate()`] or while starting
/// the worker pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The per-file decode settings are invalid.
    Decode(lf2_replay::ConfigError),
    /// `max_file_bytes` is zero, so no file could ever be read.
    MaxFileBytesZero,
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Name of the thread that failed.
        name: String,
        /// OS error text.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::MaxFileBytesZero => write!(f, "max_file_bytes must be at least 1"),
            Self::ThreadSpawnFailed { name, reason } => {
                write!(f, "failed to spawn {name}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<lf2_replay::ConfigError> for ConfigError {
    fn from(e: lf2_replay::ConfigError) -> Self {
        Self::Decode(e)
    }
}

// ── CorpusConfig ───────────────────────────────────────────────────

/// Settings for [`scan_corpus`](crate::scan_corpus).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 32]`).
    pub worker_count: Option<usize>,
    /// Files larger than this are skipped with
    /// [`CorpusError::FileTooLarge`](crate::CorpusError::FileTooLarge).
    /// Default: 16 MiB.
    pub max_file_bytes: usize,
    /// Per-file decode settings.
    pub decode: DecodeConfig,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            max_file_bytes: 16 * 1024 * 1024,
            decode: DecodeConfig::default(),
        }
    }
}

impl CorpusConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, EXPLICIT_WORKER_CAP),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, AUTO_WORKER_CAP),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decode.validate()?;
        if self.max_file_bytes == 0 {
            return Err(ConfigError::MaxFileBytesZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf2_replay::PixelLimit;

    #[test]
    fn default_is_valid() {
        assert!(CorpusConfig::default().validate().is_ok());
    }

    #[test]
    fn worker_count_clamps_zero() {
        let cfg = CorpusConfig {
            worker_count: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 1);
    }

    #[test]
    fn worker_count_clamps_large() {
        let cfg = CorpusConfig {
            worker_count: Some(500),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 64);
    }

    #[test]
    fn worker_count_auto_in_range() {
        let count = CorpusConfig::default().resolved_worker_count();
        assert!((1..=32).contains(&count), "got {count}");
    }

    #[test]
    fn zero_max_file_bytes_rejected() {
        let cfg = CorpusConfig {
            max_file_bytes: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MaxFileBytesZero));
    }

    #[test]
    fn decode_errors_surface() {
        let cfg = CorpusConfig {
            decode: DecodeConfig {
                pixel_limit: PixelLimit::Exact(0),
            },
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err, ConfigError::Decode(lf2_replay::ConfigError::ZeroPixelLimit));
        assert!(err.source().is_some());
    }
}
