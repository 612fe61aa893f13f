//! Where replayed decisions go.
//!
//! The replayer reports every decision to a [`TraceSink`] together with
//! the dictionary as it stood just before the decision was applied. What
//! the sink keeps is its own business: [`DecisionTrace`] copies the whole
//! window for each record, [`DecisionLog`] keeps only decisions and
//! offsets, and `()` keeps nothing.

use crate::decision::Decision;
use crate::dictionary::{CircularDictionary, DictionarySnapshot};

/// Receives decisions in stream order.
pub trait TraceSink {
    /// Called once per decision, before the decision touches `before`.
    ///
    /// `stream_offset` is the offset of the decision's first operand byte
    /// within the compressed stream.
    fn record(&mut self, before: &CircularDictionary, decision: Decision, stream_offset: usize);
}

impl TraceSink for () {
    #[inline]
    fn record(&mut self, _before: &CircularDictionary, _decision: Decision, _stream_offset: usize) {}
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    #[inline]
    fn record(&mut self, before: &CircularDictionary, decision: Decision, stream_offset: usize) {
        (**self).record(before, decision, stream_offset);
    }
}

// ── Full trace ──────────────────────────────────────────────────

/// One decision with the dictionary that preceded it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Dictionary state immediately before `decision` was applied.
    pub before: DictionarySnapshot,
    /// The decision itself.
    pub decision: Decision,
    /// Offset of the decision's first operand byte in the compressed stream.
    pub stream_offset: usize,
}

impl TraceRecord {
    /// Borrow as a `(snapshot, decision, offset)` triple.
    pub fn as_triple(&self) -> (&DictionarySnapshot, Decision, usize) {
        (&self.before, self.decision, self.stream_offset)
    }
}

/// Append-only record of a decode pass, snapshot included.
///
/// Each record holds a 4 KiB copy of the dictionary. For corpus-scale
/// work where only the decisions matter, use [`DecisionLog`].
///
/// # Examples
///
/// ```
/// use lf2_core::{CircularDictionary, Decision, DecisionTrace, TraceSink};
///
/// let mut dict = CircularDictionary::new();
/// let mut trace = DecisionTrace::new();
///
/// trace.record(&dict, Decision::Direct { value: 7 }, 1);
/// dict.write_advance(7);
///
/// let (before, decision, offset) = trace.iter().next().unwrap().as_triple();
/// assert_eq!(before.cursor(), 0x0fee);
/// assert_eq!(decision, Decision::Direct { value: 7 });
/// assert_eq!(offset, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionTrace {
    records: Vec<TraceRecord>,
}

impl DecisionTrace {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Decisions alone, in stream order.
    pub fn decisions(&self) -> impl Iterator<Item = Decision> + '_ {
        self.records.iter().map(|r| r.decision)
    }

    /// Consume into the underlying records.
    pub fn into_records(self) -> Vec<TraceRecord> {
        self.records
    }
}

impl TraceSink for DecisionTrace {
    fn record(&mut self, before: &CircularDictionary, decision: Decision, stream_offset: usize) {
        self.records.push(TraceRecord {
            before: before.snapshot(),
            decision,
            stream_offset,
        });
    }
}

impl IntoIterator for DecisionTrace {
    type Item = TraceRecord;
    type IntoIter = std::vec::IntoIter<TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecisionTrace {
    type Item = &'a TraceRecord;
    type IntoIter = std::slice::Iter<'a, TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Lightweight log ─────────────────────────────────────────────

/// A decision and where it sits in the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LogEntry {
    /// The decision.
    pub decision: Decision,
    /// Offset of its first operand byte.
    pub stream_offset: usize,
}

/// Decisions and offsets without dictionary copies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionLog {
    entries: Vec<LogEntry>,
}

impl DecisionLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in stream order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Decisions alone, in stream order.
    pub fn decisions(&self) -> impl Iterator<Item = Decision> + '_ {
        self.entries.iter().map(|e| e.decision)
    }

    /// How many entries are literals.
    pub fn direct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.decision.is_direct()).count()
    }

    /// How many entries are matches.
    pub fn match_count(&self) -> usize {
        self.entries.len() - self.direct_count()
    }
}

impl TraceSink for DecisionLog {
    fn record(&mut self, _before: &CircularDictionary, decision: Decision, stream_offset: usize) {
        self.entries.push(LogEntry {
            decision,
            stream_offset,
        });
    }
}

impl<'a> IntoIterator for &'a DecisionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_keeps_pre_decision_state() {
        let mut dict = CircularDictionary::new();
        let mut trace = DecisionTrace::new();
        for (i, v) in [1u8, 2, 3].into_iter().enumerate() {
            trace.record(&dict, Decision::Direct { value: v }, i);
            dict.write_advance(v);
        }
        let cursors: Vec<_> = trace.iter().map(|r| r.before.cursor()).collect();
        assert_eq!(cursors, [0x0fee, 0x0fef, 0x0ff0]);
        assert_eq!(trace.records()[2].before.tail(2).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn into_records_keeps_order() {
        let mut dict = CircularDictionary::new();
        let mut trace = DecisionTrace::new();
        trace.record(&dict, Decision::Direct { value: 4 }, 1);
        dict.write_advance(4);
        trace.record(&dict, Decision::Match { position: 0x0fee, length: 3 }, 2);
        let records = trace.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stream_offset, 1);
        assert_eq!(records[1].decision, Decision::Match { position: 0x0fee, length: 3 });
        assert_eq!(records[1].before.read_at(0x0fee), 4);
    }

    #[test]
    fn log_counts_kinds() {
        let dict = CircularDictionary::new();
        let mut log = DecisionLog::new();
        log.record(&dict, Decision::Direct { value: 0 }, 1);
        log.record(&dict, Decision::Match { position: 0, length: 3 }, 2);
        log.record(&dict, Decision::Direct { value: 9 }, 4);
        assert_eq!(log.direct_count(), 2);
        assert_eq!(log.match_count(), 1);
        assert_eq!(log.entries()[2].stream_offset, 4);
    }

    #[test]
    fn sink_through_mut_ref() {
        fn feed(mut sink: impl TraceSink) {
            sink.record(&CircularDictionary::new(), Decision::Direct { value: 1 }, 0);
        }
        let mut log = DecisionLog::new();
        feed(&mut log);
        assert_eq!(log.len(), 1);
        feed(());
    }
}
