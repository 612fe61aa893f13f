//! The decision replay state machine.
//!
//! [`Replayer`] owns everything one decode pass mutates: the stream
//! position, the dictionary, and the flag cursor. Each call to
//! [`step`](Replayer::step) consumes exactly one decision. There is no
//! shared or global state, so independent replayers can run on as many
//! threads as the caller likes.

use lf2_core::{
    CircularDictionary, Decision, DecisionKind, FlagCursor, MaskedStream, StreamItem, TraceSink,
    TruncatedStream, MAX_MATCH_LEN,
};
use smallvec::SmallVec;

/// Bytes produced by a single decision; never more than a maximal match.
pub type Emitted = SmallVec<[u8; MAX_MATCH_LEN]>;

/// Result of replaying one decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// The decision read from the stream.
    pub decision: Decision,
    /// Offset of the decision's first operand byte.
    pub stream_offset: usize,
    /// Bytes written to the dictionary and the output, in order.
    ///
    /// Shorter than the match length only when the pixel limit cut the
    /// copy short.
    pub emitted: Emitted,
}

/// Step-at-a-time decoder for one compressed stream.
///
/// # Examples
///
/// ```
/// use lf2_core::Decision;
/// use lf2_replay::Replayer;
///
/// // Control 0x00 unmasks to all-Direct; literals 0x00, 0x01 unmask
/// // to 0xFF, 0xFE.
/// let stream = [0x00, 0x00, 0x01];
/// let mut replayer = Replayer::new(&stream, Some(2));
///
/// let step = replayer.step(&mut ()).unwrap().unwrap();
/// assert_eq!(step.decision, Decision::Direct { value: 0xFF });
/// assert_eq!(step.stream_offset, 1);
///
/// let step = replayer.step(&mut ()).unwrap().unwrap();
/// assert_eq!(step.emitted.as_slice(), &[0xFE]);
///
/// // Limit reached.
/// assert!(replayer.step(&mut ()).unwrap().is_none());
/// assert_eq!(replayer.dictionary().cursor(), 0x0ff0);
/// ```
#[derive(Clone, Debug)]
pub struct Replayer<'a> {
    stream: MaskedStream<'a>,
    dictionary: CircularDictionary,
    flags: FlagCursor,
    limit: Option<usize>,
    emitted: usize,
    decisions: usize,
    halted: Option<TruncatedStream>,
}

impl<'a> Replayer<'a> {
    /// Start replaying `stream` (the bytes after the palette).
    ///
    /// With `limit = Some(n)` the replayer stops after emitting `n` bytes
    /// and treats an earlier end of stream as truncation. With `None` it
    /// stops cleanly wherever the stream ends on a decision boundary.
    pub fn new(stream: &'a [u8], limit: Option<usize>) -> Self {
        Self {
            stream: MaskedStream::new(stream),
            dictionary: CircularDictionary::new(),
            flags: FlagCursor::new(),
            limit,
            emitted: 0,
            decisions: 0,
            halted: None,
        }
    }

    /// Whether the next [`step`](Self::step) would return `Ok(None)`.
    pub fn is_finished(&self) -> bool {
        if self.halted.is_some() {
            return false;
        }
        match self.limit {
            Some(limit) => self.emitted >= limit,
            None => self.stream.is_exhausted(),
        }
    }

    /// Replay one decision, reporting it to `sink` before applying it.
    ///
    /// Returns `Ok(None)` once finished. After a truncation every further
    /// call returns the same error without touching any state.
    pub fn step<S: TraceSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<Option<Step>, TruncatedStream> {
        if let Some(err) = self.halted {
            return Err(err);
        }
        if self.is_finished() {
            return Ok(None);
        }
        match self.read_decision() {
            Ok((decision, stream_offset)) => {
                sink.record(&self.dictionary, decision, stream_offset);
                let emitted = self.apply(decision);
                self.decisions += 1;
                Ok(Some(Step {
                    decision,
                    stream_offset,
                    emitted,
                }))
            }
            Err(err) => {
                self.halted = Some(err);
                Err(err)
            }
        }
    }

    /// Replay to the end, appending every emitted byte to `output`.
    pub fn run<S: TraceSink + ?Sized>(
        &mut self,
        sink: &mut S,
        output: &mut Vec<u8>,
    ) -> Result<(), TruncatedStream> {
        while let Some(step) = self.step(sink)? {
            output.extend_from_slice(&step.emitted);
        }
        Ok(())
    }

    fn read_decision(&mut self) -> Result<(Decision, usize), TruncatedStream> {
        let kind = self.flags.next_kind(&mut self.stream)?;
        let stream_offset = self.stream.position();
        let decision = match kind {
            DecisionKind::Direct => Decision::Direct {
                value: self.stream.read_byte(StreamItem::Literal)?,
            },
            DecisionKind::Match => {
                let (upper, lower) = self.stream.read_pair()?;
                Decision::from_operands(upper, lower)
            }
        };
        Ok((decision, stream_offset))
    }

    fn apply(&mut self, decision: Decision) -> Emitted {
        let budget = self.limit.map_or(usize::MAX, |limit| limit - self.emitted);
        let mut out = Emitted::new();
        match decision {
            Decision::Direct { value } => out.push(self.dictionary.write_advance(value)),
            Decision::Match { position, length } => {
                let n = (length as usize).min(budget);
                self.dictionary.copy_run(position as usize, n, |b| out.push(b));
            }
        }
        self.emitted += out.len();
        out
    }

    /// The dictionary as it stands now.
    pub fn dictionary(&self) -> &CircularDictionary {
        &self.dictionary
    }

    /// The flag cursor as it stands now.
    pub fn flags(&self) -> &FlagCursor {
        &self.flags
    }

    /// Offset of the next unread stream byte.
    pub fn stream_position(&self) -> usize {
        self.stream.position()
    }

    /// Total stream length.
    pub fn stream_len(&self) -> usize {
        self.stream.len()
    }

    /// Bytes emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Decisions replayed so far.
    pub fn decisions(&self) -> usize {
        self.decisions
    }

    /// The configured byte limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
