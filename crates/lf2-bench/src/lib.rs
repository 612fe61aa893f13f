//! Container profiles for benchmarking LF2 replay.
//!
//! - [`literal_profile`]: every decision a `Direct`, the worst case for
//!   control-byte overhead
//! - [`mixed_profile`]: seeded mix of literals and matches
//! - [`run_profile`]: long self-overlapping matches, the run-length case

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lf2_core::{Decision, DICTIONARY_MASK, DICTIONARY_START, MAX_MATCH_LEN};
use lf2_test_utils::{random_bytes, random_decisions, ContainerBuilder};

/// Image width used by every profile.
pub const PROFILE_WIDTH: u16 = 640;

/// Wraps `decisions` in the smallest `PROFILE_WIDTH`-wide image that holds
/// them. The last row is filled with zero literals so every profile decodes
/// to completion under the default pixel limit.
fn container_for(mut decisions: Vec<Decision>) -> Vec<u8> {
    let width = PROFILE_WIDTH as usize;
    let emitted: usize = decisions.iter().map(|d| d.emitted_len()).sum();
    let height = u16::try_from(emitted.div_ceil(width)).unwrap_or(u16::MAX);
    let padding = (height as usize * width).saturating_sub(emitted);
    decisions.extend(std::iter::repeat_n(Decision::Direct { value: 0 }, padding));
    ContainerBuilder::new(PROFILE_WIDTH, height)
        .decisions(decisions)
        .build()
}

/// `pixels` literal bytes, seeded.
pub fn literal_profile(seed: u64, pixels: usize) -> Vec<u8> {
    let decisions = random_bytes(seed, pixels)
        .into_iter()
        .map(|value| Decision::Direct { value })
        .collect();
    container_for(decisions)
}

/// `count` decisions, roughly one match in three.
pub fn mixed_profile(seed: u64, count: usize) -> Vec<u8> {
    container_for(random_decisions(seed, count))
}

/// One literal per run followed by a maximum-length copy of the byte just
/// written, repeated `runs` times.
pub fn run_profile(runs: usize) -> Vec<u8> {
    let mut decisions = Vec::with_capacity(runs * 2);
    let mut cursor = DICTIONARY_START;
    for i in 0..runs {
        decisions.push(Decision::Direct { value: i as u8 });
        decisions.push(Decision::Match {
            position: cursor as u16,
            length: MAX_MATCH_LEN as u8,
        });
        cursor = (cursor + 1 + MAX_MATCH_LEN) & DICTIONARY_MASK;
    }
    container_for(decisions)
}
