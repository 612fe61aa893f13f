//! Container metadata.

use crate::{HEADER_LEN, PALETTE_ENTRY_LEN};

/// One palette colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Build from the on-disk blue, green, red order.
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            r: bgr[2],
            g: bgr[1],
            b: bgr[0],
        }
    }
}

/// Parsed header of one LF2 file. Immutable once built.
///
/// # Examples
///
/// ```
/// use lf2_core::{Container, MAGIC};
///
/// let c = Container {
///     magic: MAGIC,
///     x_offset: 0,
///     y_offset: 0,
///     width: 4,
///     height: 2,
///     transparent_index: 0,
///     palette: vec![],
/// };
///
/// assert_eq!(c.pixel_count(), 8);
/// assert_eq!(c.palette_entry_count(), 0);
/// assert_eq!(c.compressed_data_offset(), 0x18);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    /// The 8-byte tag, always `LEAF256\0` for a parsed container.
    pub magic: [u8; 8],
    /// Horizontal placement on screen.
    pub x_offset: u16,
    /// Vertical placement on screen.
    pub y_offset: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Palette index rendered as transparent.
    pub transparent_index: u8,
    /// Palette entries, at most 255.
    pub palette: Vec<Rgb>,
}

impl Container {
    /// Declared palette size.
    ///
    /// The header field is one byte, so a hand-built palette longer than
    /// 255 entries reports 255 rather than wrapping.
    pub fn palette_entry_count(&self) -> u8 {
        u8::try_from(self.palette.len()).unwrap_or(u8::MAX)
    }

    /// Offset of the first compressed byte: header plus palette table.
    pub fn compressed_data_offset(&self) -> usize {
        HEADER_LEN + self.palette.len() * PALETTE_ENTRY_LEN
    }

    /// `width * height`, the number of bytes a complete decode emits.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
