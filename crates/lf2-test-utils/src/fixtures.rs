//! Seeded generators for fuzz-style tests and benchmarks.
//!
//! All generators use ChaCha8 seeded from a `u64`, so the same seed gives
//! the same bytes on every platform.

use lf2_core::Decision;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `len` arbitrary bytes.
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

/// `count` decisions, roughly one match in three.
///
/// Every match is encodable: position in `[0, 4095]`, length in `[3, 18]`.
pub fn random_decisions(seed: u64, count: usize) -> Vec<Decision> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let r = rng.next_u32();
            if r % 3 == 0 {
                Decision::Match {
                    position: ((r >> 8) & 0x0fff) as u16,
                    length: 3 + ((r >> 20) % 16) as u8,
                }
            } else {
                Decision::Direct {
                    value: (r >> 8) as u8,
                }
            }
        })
        .collect()
}
