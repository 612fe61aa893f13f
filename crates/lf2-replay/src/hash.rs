//! Fingerprints for decision sequences and dictionary windows.
//!
//! Uses FNV-1a for fast, deterministic hashing. These hashes are not
//! cryptographically secure; they exist so two runs over the same file can
//! be checked for identical behaviour without keeping either trace.

use lf2_core::{Decision, DICTIONARY_SIZE};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

const TAG_DIRECT: u8 = 1;
const TAG_MATCH: u8 = 0;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u16(mut hash: u64, v: u16) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Running FNV-1a state over decisions, for callers that hash as they go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionHasher {
    state: u64,
}

impl DecisionHasher {
    /// Fresh state.
    pub fn new() -> Self {
        Self { state: FNV_OFFSET }
    }

    /// Fold one decision in. The kind tag is hashed first so a literal
    /// and a match with coinciding operands never collide trivially.
    pub fn update(&mut self, decision: Decision) {
        self.state = match decision {
            Decision::Direct { value } => fnv1a_byte(fnv1a_byte(self.state, TAG_DIRECT), value),
            Decision::Match { position, length } => {
                let h = fnv1a_byte(self.state, TAG_MATCH);
                fnv1a_byte(fnv1a_u16(h, position), length)
            }
        };
    }

    /// Current digest.
    pub fn finish(&self) -> u64 {
        self.state
    }
}

impl Default for DecisionHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a whole decision sequence.
///
/// Returns `FNV_OFFSET` for an empty sequence.
pub fn decision_hash(decisions: impl IntoIterator<Item = Decision>) -> u64 {
    let mut hasher = DecisionHasher::new();
    for d in decisions {
        hasher.update(d);
    }
    hasher.finish()
}

/// Hash a dictionary window and its cursor.
pub fn dictionary_hash(bytes: &[u8; DICTIONARY_SIZE], cursor: usize) -> u64 {
    let mut hash = fnv1a_u16(FNV_OFFSET, cursor as u16);
    for &b in bytes.iter() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}
