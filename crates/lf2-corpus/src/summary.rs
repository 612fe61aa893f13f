//! Per-file results of a scan.
//!
//! Workers never keep a trace: [`SummarySink`] folds each decision into
//! running counts and a hash as the replayer reports it.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use lf2_core::{CircularDictionary, Container, Decision, FormatError, TraceSink, TruncatedStream};
use lf2_replay::{decode_file, DecisionHasher, DecodeConfig};

use crate::config::CorpusConfig;
use crate::error::CorpusError;

/// Running counts and hash over a decision stream.
#[derive(Clone, Debug, Default)]
pub struct SummarySink {
    hasher: DecisionHasher,
    direct: usize,
    matches: usize,
    match_bytes: usize,
}

impl SummarySink {
    /// Empty counts.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraceSink for SummarySink {
    fn record(&mut self, _before: &CircularDictionary, decision: Decision, _stream_offset: usize) {
        self.hasher.update(decision);
        match decision {
            Decision::Direct { .. } => self.direct += 1,
            Decision::Match { length, .. } => {
                self.matches += 1;
                self.match_bytes += length as usize;
            }
        }
    }
}

/// What one file's decode produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSummary {
    /// Parsed header and palette.
    pub container: Container,
    /// `Direct` decisions replayed.
    pub direct: usize,
    /// `Match` decisions replayed.
    pub matches: usize,
    /// Bytes the matches asked for, before any clipping at the pixel limit.
    pub match_bytes: usize,
    /// Bytes emitted.
    pub emitted: usize,
    /// Stream bytes consumed.
    pub stream_consumed: usize,
    /// Stream bytes available.
    pub stream_len: usize,
    /// FNV-1a hash of the decision sequence.
    pub trace_hash: u64,
    /// Where the stream ran out, if it did.
    pub truncation: Option<TruncatedStream>,
}

impl FileSummary {
    /// Total decisions replayed.
    pub fn decisions(&self) -> usize {
        self.direct + self.matches
    }

    /// Whether the decode ran to completion.
    pub fn is_complete(&self) -> bool {
        self.truncation.is_none()
    }

    /// Stream bytes left unread.
    pub fn trailing_bytes(&self) -> usize {
        self.stream_len - self.stream_consumed
    }
}

/// Summarise an in-memory container.
pub fn summarize_bytes(bytes: &[u8], config: &DecodeConfig) -> Result<FileSummary, FormatError> {
    let (container, replay) = decode_file(bytes, config, SummarySink::new())?;
    let sink = replay.trace;
    Ok(FileSummary {
        container,
        direct: sink.direct,
        matches: sink.matches,
        match_bytes: sink.match_bytes,
        emitted: replay.output.len(),
        stream_consumed: replay.stream_consumed,
        stream_len: replay.stream_len,
        trace_hash: sink.hasher.finish(),
        truncation: replay.status.err(),
    })
}

/// Read and summarise one file, honouring `max_file_bytes`.
///
/// The size check on the metadata is only a fast path. The read itself
/// stops one byte past the ceiling, so a file that grows between the two
/// is still rejected without being loaded whole.
pub fn scan_file(path: &Path, config: &CorpusConfig) -> Result<FileSummary, CorpusError> {
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    let too_large = |len| CorpusError::FileTooLarge {
        path: path.to_path_buf(),
        len,
        limit: config.max_file_bytes,
    };
    let file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();
    if len > config.max_file_bytes as u64 {
        return Err(too_large(len));
    }
    let bytes = read_capped(file, config.max_file_bytes, len).map_err(io_err)?;
    if bytes.len() > config.max_file_bytes {
        return Err(too_large(bytes.len() as u64));
    }
    summarize_bytes(&bytes, &config.decode).map_err(|source| CorpusError::InvalidFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Read at most `limit + 1` bytes, so the caller can tell an over-limit
/// source from one that fits exactly.
fn read_capped(reader: impl Read, limit: usize, size_hint: u64) -> io::Result<Vec<u8>> {
    let cap = (limit as u64).saturating_add(1);
    let mut bytes = Vec::with_capacity(size_hint.min(limit as u64) as usize);
    reader.take(cap).read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use lf2_core::StreamItem;
    use lf2_replay::decision_hash;
    use lf2_test_utils::ContainerBuilder;

    #[test]
    fn counts_and_hash_match_decisions() {
        let builder = ContainerBuilder::new(7, 1)
            .direct(&[1, 2])
            .matched(0x0fee, 5);
        let summary = summarize_bytes(&builder.build(), &DecodeConfig::default()).unwrap();
        assert_eq!(summary.direct, 2);
        assert_eq!(summary.matches, 1);
        assert_eq!(summary.match_bytes, 5);
        assert_eq!(summary.emitted, 7);
        assert_eq!(summary.trace_hash, decision_hash(builder.planned().iter().copied()));
        assert!(summary.is_complete());
        assert_eq!(summary.trailing_bytes(), 0);
    }

    #[test]
    fn truncation_is_summarised_not_failed() {
        let file = ContainerBuilder::new(5, 1).direct(&[1, 2]).build();
        let summary = summarize_bytes(&file, &DecodeConfig::default()).unwrap();
        assert_eq!(summary.decisions(), 2);
        let t = summary.truncation.unwrap();
        assert_eq!(t.item, StreamItem::MatchOperands);
    }

    #[test]
    fn oversized_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.lf2");
        fs::write(&path, ContainerBuilder::new(1, 1).direct(&[0]).build()).unwrap();
        let config = CorpusConfig {
            max_file_bytes: 10,
            ..Default::default()
        };
        match scan_file(&path, &config) {
            Err(CorpusError::FileTooLarge { len, limit, .. }) => {
                assert_eq!(len, 26);
                assert_eq!(limit, 10);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn file_at_the_ceiling_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.lf2");
        let file = ContainerBuilder::new(1, 1).direct(&[9]).build();
        fs::write(&path, &file).unwrap();

        let exact = CorpusConfig {
            max_file_bytes: file.len(),
            ..Default::default()
        };
        assert_eq!(scan_file(&path, &exact).unwrap().emitted, 1);

        let short = CorpusConfig {
            max_file_bytes: file.len() - 1,
            ..Default::default()
        };
        assert!(matches!(
            scan_file(&path, &short),
            Err(CorpusError::FileTooLarge { len: 26, limit: 25, .. })
        ));
    }

    #[test]
    fn capped_read_stops_one_past_the_limit() {
        // A source longer than its size hint, as when a file grows after
        // its metadata was read.
        let source = io::Cursor::new(vec![7u8; 1000]);
        let bytes = read_capped(source, 10, 4).unwrap();
        assert_eq!(bytes.len(), 11);

        let fits = read_capped(io::Cursor::new(vec![7u8; 10]), 10, 10).unwrap();
        assert_eq!(fits.len(), 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_file(&dir.path().join("gone.lf2"), &CorpusConfig::default()).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
