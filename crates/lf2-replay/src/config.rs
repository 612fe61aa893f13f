//! Decode configuration and validation.

use std::error::Error;
use std::fmt;

use lf2_core::Container;

// ── PixelLimit ─────────────────────────────────────────────────────

/// When a decode pass stops emitting bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelLimit {
    /// Stop at `width * height` from the header. Running out of stream
    /// before that is a truncation.
    #[default]
    FromHeader,
    /// Stop after exactly this many bytes.
    Exact(usize),
    /// Run until the stream is consumed. Over- or under-producing
    /// relative to the header is left to the caller to judge.
    Unbounded,
}

impl PixelLimit {
    /// The byte target for `container`, or `None` when unbounded.
    pub fn resolve(&self, container: &Container) -> Option<usize> {
        match *self {
            Self::FromHeader => Some(container.pixel_count()),
            Self::Exact(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`DecodeConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `PixelLimit::Exact(0)` would decode nothing.
    ZeroPixelLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPixelLimit => write!(f, "exact pixel limit must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── DecodeConfig ───────────────────────────────────────────────────

/// Settings for one decode pass.
///
/// # Examples
///
/// ```
/// use lf2_replay::{DecodeConfig, PixelLimit};
///
/// let config = DecodeConfig::default();
/// assert_eq!(config.pixel_limit, PixelLimit::FromHeader);
/// assert!(config.validate().is_ok());
///
/// let bad = DecodeConfig { pixel_limit: PixelLimit::Exact(0) };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Stop condition for emitted bytes. Default: [`PixelLimit::FromHeader`].
    pub pixel_limit: PixelLimit,
}

impl DecodeConfig {
    /// Run to the end of the stream regardless of the header.
    pub fn unbounded() -> Self {
        Self {
            pixel_limit: PixelLimit::Unbounded,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_limit == PixelLimit::Exact(0) {
            return Err(ConfigError::ZeroPixelLimit);
        }
        Ok(())
    }
}
