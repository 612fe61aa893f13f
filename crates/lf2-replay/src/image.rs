//! Palette-indexed image reconstruction.
//!
//! The stream stores rows bottom-up: byte `i` belongs at column
//! `i % width`, row `height - 1 - i / width`. [`IndexedImage`] undoes that
//! flip and keeps the palette alongside the indices.

use lf2_core::{Container, Rgb};

/// A decoded picture as palette indices, rows top-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedImage {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Horizontal placement from the header.
    pub x_offset: u16,
    /// Vertical placement from the header.
    pub y_offset: u16,
    /// Index drawn as fully transparent.
    pub transparent_index: u8,
    /// Colour table.
    pub palette: Vec<Rgb>,
    /// `width * height` indices, row-major, top row first.
    pub pixels: Vec<u8>,
}

impl IndexedImage {
    /// Lay out `output` (stream order) as a top-down image.
    ///
    /// Bytes past `width * height` are ignored. Pixels the output never
    /// reached stay at index 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use lf2_core::{Container, MAGIC};
    /// use lf2_replay::IndexedImage;
    ///
    /// let c = Container {
    ///     magic: MAGIC,
    ///     x_offset: 0,
    ///     y_offset: 0,
    ///     width: 2,
    ///     height: 2,
    ///     transparent_index: 0,
    ///     palette: vec![],
    /// };
    ///
    /// // Stream order is bottom row first.
    /// let img = IndexedImage::from_output(&c, &[1, 2, 3, 4]);
    /// assert_eq!(img.pixels, [3, 4, 1, 2]);
    /// assert_eq!(img.pixel(0, 1), Some(1));
    /// ```
    pub fn from_output(container: &Container, output: &[u8]) -> Self {
        let width = container.width as usize;
        let height = container.height as usize;
        let mut pixels = vec![0u8; width * height];

        if width > 0 {
            for (row_from_bottom, row) in output.chunks(width).take(height).enumerate() {
                let start = (height - 1 - row_from_bottom) * width;
                pixels[start..start + row.len()].copy_from_slice(row);
            }
        }

        Self {
            width: container.width,
            height: container.height,
            x_offset: container.x_offset,
            y_offset: container.y_offset,
            transparent_index: container.transparent_index,
            palette: container.palette.clone(),
            pixels,
        }
    }

    /// Palette index at `(x, y)`, top-left origin.
    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Whether `index` renders as transparent: either the designated
    /// transparent index or outside the palette.
    pub fn is_transparent(&self, index: u8) -> bool {
        index == self.transparent_index || index as usize >= self.palette.len()
    }

    /// Expand to 8-bit RGBA, 4 bytes per pixel.
    ///
    /// Indices outside the palette render black. Transparent pixels keep
    /// their palette colour with alpha 0.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            let color = self
                .palette
                .get(index as usize)
                .copied()
                .unwrap_or_default();
            let alpha = if self.is_transparent(index) { 0 } else { 255 };
            rgba.extend_from_slice(&[color.r, color.g, color.b, alpha]);
        }
        rgba
    }
}
