//! Collected results of a scan, in submission order.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::CorpusError;
use crate::summary::FileSummary;

/// One file's outcome.
pub type FileOutcome = Result<FileSummary, CorpusError>;

/// Outcomes keyed by path, iterated in the order the paths were submitted.
#[derive(Debug, Default)]
pub struct CorpusReport {
    entries: IndexMap<PathBuf, FileOutcome>,
}

impl CorpusReport {
    pub(crate) fn from_ordered(entries: impl IntoIterator<Item = (PathBuf, FileOutcome)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Outcome for `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileOutcome> {
        self.entries.get(path.as_ref())
    }

    /// All outcomes in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileOutcome)> {
        self.entries.iter()
    }

    /// Files scanned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was scanned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summaries of files that decoded, complete or not.
    pub fn summaries(&self) -> impl Iterator<Item = (&PathBuf, &FileSummary)> {
        self.entries
            .iter()
            .filter_map(|(p, o)| o.as_ref().ok().map(|s| (p, s)))
    }

    /// Files that produced no summary.
    pub fn failures(&self) -> impl Iterator<Item = &CorpusError> {
        self.entries.values().filter_map(|o| o.as_ref().err())
    }

    /// Files that decoded to completion.
    pub fn complete_count(&self) -> usize {
        self.summaries().filter(|(_, s)| s.is_complete()).count()
    }

    /// Files whose stream ran out early.
    pub fn truncated_count(&self) -> usize {
        self.summaries().filter(|(_, s)| !s.is_complete()).count()
    }

    /// Files that produced no summary.
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Decisions replayed across every summarised file.
    pub fn total_decisions(&self) -> usize {
        self.summaries().map(|(_, s)| s.decisions()).sum()
    }

    /// Consume the report into its map.
    pub fn into_entries(self) -> IndexMap<PathBuf, FileOutcome> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a CorpusReport {
    type Item = (&'a PathBuf, &'a FileOutcome);
    type IntoIter = indexmap::map::Iter<'a, PathBuf, FileOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
