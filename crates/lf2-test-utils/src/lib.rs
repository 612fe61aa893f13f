//! Test utilities for LF2 replay development.
//!
//! Provides [`ContainerBuilder`] for assembling container files from an
//! explicit list of decisions, a plain-array [`simulate`] oracle, and
//! seeded generators in [`fixtures`]. None of this chooses matches: the
//! caller states every decision and the builder only lays out bytes.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{random_bytes, random_decisions};

use lf2_core::{Decision, Rgb, HEADER_LEN, MAGIC};

/// Assembles a complete container from header fields and decisions.
#[derive(Clone, Debug)]
pub struct ContainerBuilder {
    width: u16,
    height: u16,
    x_offset: u16,
    y_offset: u16,
    transparent_index: u8,
    palette: Vec<Rgb>,
    decisions: Vec<Decision>,
    trailing: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            x_offset: 0,
            y_offset: 0,
            transparent_index: 0,
            palette: Vec::new(),
            decisions: Vec::new(),
            trailing: Vec::new(),
        }
    }

    pub fn offsets(mut self, x: u16, y: u16) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn transparent_index(mut self, index: u8) -> Self {
        self.transparent_index = index;
        self
    }

    /// # Panics
    ///
    /// Panics with more than 255 entries.
    pub fn palette(mut self, palette: Vec<Rgb>) -> Self {
        assert!(palette.len() <= 255, "palette holds at most 255 entries");
        self.palette = palette;
        self
    }

    /// Append one `Direct` decision per value.
    pub fn direct(mut self, values: &[u8]) -> Self {
        self.decisions
            .extend(values.iter().map(|&value| Decision::Direct { value }));
        self
    }

    /// Append a `Match`.
    ///
    /// # Panics
    ///
    /// Panics if the position or length is not encodable.
    pub fn matched(mut self, position: usize, length: usize) -> Self {
        let d = Decision::checked_match(position, length)
            .unwrap_or_else(|| panic!("unencodable match ({position}, {length})"));
        self.decisions.push(d);
        self
    }

    pub fn decisions(mut self, decisions: impl IntoIterator<Item = Decision>) -> Self {
        self.decisions.extend(decisions);
        self
    }

    /// Raw bytes appended after the packed stream, unmasked as given.
    pub fn trailing(mut self, raw: &[u8]) -> Self {
        self.trailing.extend_from_slice(raw);
        self
    }

    /// Decisions added so far.
    pub fn planned(&self) -> &[Decision] {
        &self.decisions
    }

    /// The 24-byte header plus palette.
    pub fn header(&self) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out[..8].copy_from_slice(&MAGIC);
        out[0x08..0x0A].copy_from_slice(&self.x_offset.to_le_bytes());
        out[0x0A..0x0C].copy_from_slice(&self.y_offset.to_le_bytes());
        out[0x0C..0x0E].copy_from_slice(&self.width.to_le_bytes());
        out[0x0E..0x10].copy_from_slice(&self.height.to_le_bytes());
        out[0x12] = self.transparent_index;
        out[0x16] = self.palette.len() as u8;
        for c in &self.palette {
            out.extend_from_slice(&[c.b, c.g, c.r]);
        }
        out
    }

    /// The compressed stream alone.
    pub fn stream(&self) -> Vec<u8> {
        let mut out = pack_decisions(&self.decisions);
        out.extend_from_slice(&self.trailing);
        out
    }

    /// Header, palette and stream.
    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header();
        out.extend(self.stream());
        out
    }
}

/// Lay out decisions as masked control bytes and operands.
///
/// Unused bits of the final control byte are left as `Match`.
pub fn pack_decisions(decisions: &[Decision]) -> Vec<u8> {
    let mut out = Vec::new();
    for group in decisions.chunks(8) {
        let mut control = 0u8;
        for (i, d) in group.iter().enumerate() {
            control |= d.kind().bit() << (7 - i);
        }
        out.push(!control);
        for d in group {
            let (upper, lower) = d.operands();
            match d {
                Decision::Direct { .. } => out.push(!upper),
                Decision::Match { .. } => out.extend_from_slice(&[!upper, !lower]),
            }
        }
    }
    out
}

/// Reference expansion of a decision list with a plain array, no limit.
///
/// Deliberately shares no code with the replayer so it can serve as an
/// independent oracle.
pub fn simulate(decisions: &[Decision]) -> Vec<u8> {
    let mut ring = [0x20u8; 0x1000];
    let mut cursor = 0x0fee;
    let mut out = Vec::new();
    for d in decisions {
        match *d {
            Decision::Direct { value } => {
                ring[cursor] = value;
                cursor = (cursor + 1) & 0x0fff;
                out.push(value);
            }
            Decision::Match { position, length } => {
                let mut src = position as usize & 0x0fff;
                for _ in 0..length {
                    let b = ring[src];
                    ring[cursor] = b;
                    cursor = (cursor + 1) & 0x0fff;
                    src = (src + 1) & 0x0fff;
                    out.push(b);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_control_msb_first() {
        let stream = pack_decisions(&[
            Decision::Direct { value: 0xAA },
            Decision::Match { position: 0x123, length: 4 },
        ]);
        // Control 0b1000_0000, literal, upper 0x31, lower 0x12.
        assert_eq!(stream, [!0x80u8, !0xAA, !0x31, !0x12]);
    }

    #[test]
    fn ninth_decision_gets_new_control() {
        let stream = pack_decisions(&[Decision::Direct { value: 0 }; 9]);
        assert_eq!(stream.len(), 1 + 8 + 1 + 1);
        assert_eq!(stream[0], 0x00);
        assert_eq!(stream[9], !0x80u8);
    }

    #[test]
    fn header_layout() {
        let h = ContainerBuilder::new(0x0102, 0x0304)
            .offsets(5, 6)
            .palette(vec![Rgb { r: 1, g: 2, b: 3 }])
            .header();
        assert_eq!(&h[..8], b"LEAF256\0");
        assert_eq!(&h[0x0C..0x10], &[0x02, 0x01, 0x04, 0x03]);
        assert_eq!(h[0x16], 1);
        assert_eq!(&h[0x18..], &[3, 2, 1]);
    }

    #[test]
    fn simulate_run_length() {
        let out = simulate(&[
            Decision::Direct { value: 9 },
            Decision::Match { position: 0x0fee, length: 3 },
        ]);
        assert_eq!(out, [9, 9, 9, 9]);
    }
}
