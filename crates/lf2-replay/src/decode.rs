//! One-call decoding of a whole container.
//!
//! These wrap [`Replayer`] for callers that want every decision in one go.
//! Truncation never discards work: the returned [`Replay`] carries the
//! partial trace and output next to the error.

use lf2_core::{
    Container, DecisionTrace, FormatError, TraceSink, TruncatedStream, MAX_MATCH_LEN,
};
use tracing::debug;

use crate::config::DecodeConfig;
use crate::header::{compressed_stream, parse_header};
use crate::replayer::Replayer;

/// Everything one decode pass produced.
#[derive(Clone, Debug)]
pub struct Replay<S> {
    /// The sink that received every decision.
    pub trace: S,
    /// Reconstructed bytes in stream (bottom-up) order.
    pub output: Vec<u8>,
    /// `Err` when the stream ended before the pass was complete.
    pub status: Result<(), TruncatedStream>,
    /// Decisions replayed.
    pub decisions: usize,
    /// Stream bytes consumed.
    pub stream_consumed: usize,
    /// Stream bytes available.
    pub stream_len: usize,
}

impl<S> Replay<S> {
    /// Whether the pass finished without truncation.
    pub fn is_complete(&self) -> bool {
        self.status.is_ok()
    }

    /// The truncation, if any.
    pub fn error(&self) -> Option<&TruncatedStream> {
        self.status.as_ref().err()
    }

    /// Stream bytes left unread after the pass.
    pub fn trailing_bytes(&self) -> usize {
        self.stream_len - self.stream_consumed
    }
}

/// Decode a whole file's stream into a full [`DecisionTrace`].
///
/// `bytes` is the complete file and `container` its parsed header. Stops at
/// `width * height` output bytes.
///
/// # Examples
///
/// ```
/// use lf2_core::Decision;
/// use lf2_replay::{decode, parse_header};
///
/// let mut file = vec![0u8; 0x18];
/// file[..8].copy_from_slice(b"LEAF256\0");
/// file[0x0C] = 4; // width
/// file[0x0E] = 1; // height
/// file.extend_from_slice(&[0x00, 0x00, 0x01, 0x02, 0x03]);
///
/// let container = parse_header(&file).unwrap();
/// let (trace, output, status) = decode(&file, &container);
///
/// assert!(status.is_ok());
/// assert_eq!(output, [0xFF, 0xFE, 0xFD, 0xFC]);
/// let values: Vec<_> = trace.decisions().collect();
/// assert_eq!(values[3], Decision::Direct { value: 0xFC });
/// ```
pub fn decode(
    bytes: &[u8],
    container: &Container,
) -> (DecisionTrace, Vec<u8>, Result<(), TruncatedStream>) {
    let replay = decode_with(bytes, container, &DecodeConfig::default(), DecisionTrace::new());
    (replay.trace, replay.output, replay.status)
}

/// Decode with an explicit configuration and sink.
pub fn decode_with<S: TraceSink>(
    bytes: &[u8],
    container: &Container,
    config: &DecodeConfig,
    mut sink: S,
) -> Replay<S> {
    let stream = compressed_stream(bytes, container);
    let limit = config.pixel_limit.resolve(container);
    let capacity = limit
        .unwrap_or(0)
        .min(stream.len().saturating_mul(MAX_MATCH_LEN));

    let mut replayer = Replayer::new(stream, limit);
    let mut output = Vec::with_capacity(capacity);
    let status = replayer.run(&mut sink, &mut output);

    debug!(
        decisions = replayer.decisions(),
        emitted = output.len(),
        consumed = replayer.stream_position(),
        stream_len = stream.len(),
        truncated = status.is_err(),
        "replayed LF2 stream"
    );

    Replay {
        trace: sink,
        output,
        status,
        decisions: replayer.decisions(),
        stream_consumed: replayer.stream_position(),
        stream_len: stream.len(),
    }
}

/// Parse the header, then decode with `config` into `sink`.
///
/// Only a [`FormatError`] is returned as `Err`; truncation lives in
/// [`Replay::status`].
pub fn decode_file<S: TraceSink>(
    bytes: &[u8],
    config: &DecodeConfig,
    sink: S,
) -> Result<(Container, Replay<S>), FormatError> {
    let container = parse_header(bytes)?;
    let replay = decode_with(bytes, &container, config, sink);
    Ok((container, replay))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PixelLimit;
    use lf2_core::{Decision, DecisionLog, StreamItem};
    use lf2_test_utils::ContainerBuilder;

    #[test]
    fn four_literals_stop_at_pixel_count() {
        let mut file = ContainerBuilder::new(4, 1).build();
        file.extend_from_slice(&[0x00, 0x00, 0x01, 0x02, 0x03]);
        let container = parse_header(&file).unwrap();
        let (trace, output, status) = decode(&file, &container);
        assert!(status.is_ok());
        let decisions: Vec<_> = trace.decisions().collect();
        assert_eq!(
            decisions,
            [0xFF, 0xFE, 0xFD, 0xFC].map(|value| Decision::Direct { value })
        );
        assert_eq!(output, [0xFF, 0xFE, 0xFD, 0xFC]);
    }

    #[test]
    fn stops_at_pixel_count_with_stream_left() {
        let file = ContainerBuilder::new(2, 1).direct(&[1, 2, 3, 4]).build();
        let (c, replay) = decode_file(&file, &DecodeConfig::default(), DecisionLog::new()).unwrap();
        assert!(replay.is_complete());
        assert_eq!(replay.output, [1, 2]);
        assert_eq!(replay.trace.len(), 2);
        assert_eq!(replay.trailing_bytes(), 2);
        assert_eq!(c.pixel_count(), 2);
    }

    #[test]
    fn unbounded_runs_past_header_count() {
        let file = ContainerBuilder::new(2, 1).direct(&[1, 2, 3, 4]).build();
        let (_, replay) = decode_file(&file, &DecodeConfig::unbounded(), ()).unwrap();
        assert!(replay.is_complete());
        assert_eq!(replay.output, [1, 2, 3, 4]);
        assert_eq!(replay.trailing_bytes(), 0);
    }

    #[test]
    fn bytes_past_the_image_are_left_unread() {
        let file = ContainerBuilder::new(2, 1)
            .direct(&[1, 2])
            .trailing(&[0xAA, 0xBB])
            .build();
        let (_, bounded) = decode_file(&file, &DecodeConfig::default(), ()).unwrap();
        assert!(bounded.is_complete());
        assert_eq!(bounded.output, [1, 2]);
        assert_eq!(bounded.trailing_bytes(), 2);

        // Without a limit the next Match bit consumes both bytes as operands.
        let (_, unbounded) = decode_file(&file, &DecodeConfig::unbounded(), ()).unwrap();
        assert!(unbounded.is_complete());
        assert_eq!(unbounded.trailing_bytes(), 0);
        assert_eq!(unbounded.decisions, 3);
        assert!(unbounded.output.len() >= 2 + 3);
    }

    #[test]
    fn exact_limit() {
        let file = ContainerBuilder::new(100, 100).direct(&[5; 20]).build();
        let config = DecodeConfig {
            pixel_limit: PixelLimit::Exact(3),
        };
        let (_, replay) = decode_file(&file, &config, ()).unwrap();
        assert_eq!(replay.output, [5, 5, 5]);
        assert_eq!(replay.decisions, 3);
    }

    #[test]
    fn truncation_keeps_partial_output() {
        let file = ContainerBuilder::new(10, 1).direct(&[1, 2, 3]).build();
        let (_, replay) = decode_file(&file, &DecodeConfig::default(), DecisionLog::new()).unwrap();
        let err = replay.error().copied().unwrap();
        assert_eq!(replay.output, [1, 2, 3]);
        assert_eq!(replay.trace.len(), 3);
        // Remaining control bits are zero, i.e. Match.
        assert_eq!(err.item, StreamItem::MatchOperands);
        assert_eq!(err.available, 0);
    }

    #[test]
    fn bad_header_is_only_err() {
        assert!(decode_file(b"LEAF", &DecodeConfig::default(), ()).is_err());
    }

    #[test]
    fn huge_header_does_not_preallocate() {
        let file = ContainerBuilder::new(u16::MAX, u16::MAX).direct(&[1]).build();
        let (_, replay) = decode_file(&file, &DecodeConfig::default(), ()).unwrap();
        assert_eq!(replay.output, [1]);
        assert!(!replay.is_complete());
        assert!(replay.output.capacity() < 1024);
    }
}
