//! Decision-by-decision comparison of two traces.
//!
//! Used to check a candidate compressor's choices against the decisions
//! recovered from an original file: both sides are plain decision
//! sequences, compared position by position.

use lf2_core::Decision;

/// The first place two decision sequences disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionDivergence {
    /// Index of the differing decision.
    pub index: usize,
    /// Output byte offset where the expected decision starts.
    pub output_offset: usize,
    /// Expected decision, `None` if the expected side ended first.
    pub expected: Option<Decision>,
    /// Actual decision, `None` if the actual side ended first.
    pub actual: Option<Decision>,
}

/// Summary of a full comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Decisions on the expected side.
    pub expected_len: usize,
    /// Decisions on the actual side.
    pub actual_len: usize,
    /// Positions (including length overhang) where the sides differ.
    pub mismatches: usize,
    /// Positions where the two sides chose a different kind.
    pub kind_mismatches: usize,
    /// The earliest divergence, if any.
    pub first: Option<DecisionDivergence>,
}

impl ComparisonReport {
    /// Whether the sequences are identical.
    pub fn is_identical(&self) -> bool {
        self.first.is_none()
    }

    /// Fraction of expected decisions reproduced exactly, in `[0, 1]`.
    ///
    /// An empty expected side scores 1.0 only when the actual side is
    /// empty too.
    pub fn agreement(&self) -> f64 {
        let longest = self.expected_len.max(self.actual_len);
        if longest == 0 {
            return 1.0;
        }
        (longest - self.mismatches) as f64 / longest as f64
    }
}

/// Compare `expected` against `actual` position by position.
///
/// # Examples
///
/// ```
/// use lf2_core::Decision;
/// use lf2_replay::compare_decisions;
///
/// let a = [Decision::Direct { value: 1 }, Decision::Match { position: 0, length: 3 }];
/// let b = [Decision::Direct { value: 1 }, Decision::Direct { value: 2 }];
///
/// let report = compare_decisions(a, b);
/// let first = report.first.unwrap();
/// assert_eq!(first.index, 1);
/// assert_eq!(first.output_offset, 1);
/// assert_eq!(report.kind_mismatches, 1);
/// ```
pub fn compare_decisions(
    expected: impl IntoIterator<Item = Decision>,
    actual: impl IntoIterator<Item = Decision>,
) -> ComparisonReport {
    let mut expected = expected.into_iter();
    let mut actual = actual.into_iter();
    let mut report = ComparisonReport::default();
    let mut output_offset = 0usize;
    let mut index = 0usize;

    loop {
        let (e, a) = (expected.next(), actual.next());
        if e.is_none() && a.is_none() {
            break;
        }
        report.expected_len += e.is_some() as usize;
        report.actual_len += a.is_some() as usize;

        if e != a {
            report.mismatches += 1;
            if let (Some(e), Some(a)) = (e, a) {
                if e.kind() != a.kind() {
                    report.kind_mismatches += 1;
                }
            }
            if report.first.is_none() {
                report.first = Some(DecisionDivergence {
                    index,
                    output_offset,
                    expected: e,
                    actual: a,
                });
            }
        }

        if let Some(e) = e {
            output_offset += e.emitted_len();
        }
        index += 1;
    }

    report
}
