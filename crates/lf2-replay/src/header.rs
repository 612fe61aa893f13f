//! Container header and palette parsing.
//!
//! All multi-byte fields are little-endian. The layout is fixed:
//!
//! ```text
//! 0x00  [u8; 8]  magic "LEAF256\0"
//! 0x08  u16      x offset
//! 0x0A  u16      y offset
//! 0x0C  u16      width
//! 0x0E  u16      height
//! 0x12  u8       transparent palette index
//! 0x16  u8       palette entry count
//! 0x18  [B,G,R]  palette, entry count * 3 bytes
//! ....           compressed stream
//! ```

use lf2_core::{
    Container, FormatError, Rgb, HEADER_LEN, MAGIC, MIN_CONTAINER_LEN, PALETTE_ENTRY_LEN,
};
use tracing::debug;

const X_OFFSET_AT: usize = 0x08;
const Y_OFFSET_AT: usize = 0x0A;
const WIDTH_AT: usize = 0x0C;
const HEIGHT_AT: usize = 0x0E;
const TRANSPARENT_AT: usize = 0x12;
const PALETTE_COUNT_AT: usize = 0x16;

/// Parse and validate a container header and its palette.
///
/// Pure: the same bytes always give the same [`Container`].
///
/// # Errors
///
/// [`FormatError::TooShort`] under 24 bytes, [`FormatError::BadMagic`] when
/// the tag is wrong, [`FormatError::PaletteTruncated`] when the palette
/// table runs past the end of `bytes`.
///
/// # Examples
///
/// ```
/// use lf2_replay::parse_header;
///
/// let mut file = vec![0u8; 0x18];
/// file[..8].copy_from_slice(b"LEAF256\0");
/// file[0x0C] = 4; // width
/// file[0x0E] = 1; // height
///
/// let c = parse_header(&file).unwrap();
/// assert_eq!((c.width, c.height), (4, 1));
/// assert_eq!(c.compressed_data_offset(), 0x18);
/// ```
pub fn parse_header(bytes: &[u8]) -> Result<Container, FormatError> {
    if bytes.len() < MIN_CONTAINER_LEN {
        return Err(FormatError::TooShort { len: bytes.len() });
    }

    let mut magic = [0u8; 8];
    magic.copy_from_slice(&bytes[..8]);
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic });
    }

    let entries = bytes[PALETTE_COUNT_AT];
    let table_len = entries as usize * PALETTE_ENTRY_LEN;
    let table = bytes
        .get(HEADER_LEN..HEADER_LEN + table_len)
        .ok_or(FormatError::PaletteTruncated {
            entries,
            available: bytes.len() - HEADER_LEN,
        })?;
    let palette = table
        .chunks_exact(PALETTE_ENTRY_LEN)
        .map(|bgr| Rgb::from_bgr([bgr[0], bgr[1], bgr[2]]))
        .collect();

    let container = Container {
        magic,
        x_offset: read_u16_le(bytes, X_OFFSET_AT),
        y_offset: read_u16_le(bytes, Y_OFFSET_AT),
        width: read_u16_le(bytes, WIDTH_AT),
        height: read_u16_le(bytes, HEIGHT_AT),
        transparent_index: bytes[TRANSPARENT_AT],
        palette,
    };

    debug!(
        width = container.width,
        height = container.height,
        x = container.x_offset,
        y = container.y_offset,
        colors = entries,
        transparent = container.transparent_index,
        "parsed LF2 header"
    );

    Ok(container)
}

/// The compressed stream that follows the palette.
///
/// Empty when the file ends at the palette.
pub fn compressed_stream<'a>(bytes: &'a [u8], container: &Container) -> &'a [u8] {
    bytes.get(container.compressed_data_offset()..).unwrap_or(&[])
}

fn read_u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf2_test_utils::ContainerBuilder;

    #[test]
    fn reads_every_field() {
        let file = ContainerBuilder::new(320, 200)
            .offsets(16, 32)
            .transparent_index(5)
            .palette(vec![Rgb { r: 1, g: 2, b: 3 }, Rgb { r: 4, g: 5, b: 6 }])
            .build();
        let c = parse_header(&file).unwrap();
        assert_eq!(c.width, 320);
        assert_eq!(c.height, 200);
        assert_eq!(c.x_offset, 16);
        assert_eq!(c.y_offset, 32);
        assert_eq!(c.transparent_index, 5);
        assert_eq!(c.palette_entry_count(), 2);
        assert_eq!(c.palette[1], Rgb { r: 4, g: 5, b: 6 });
        assert_eq!(c.compressed_data_offset(), 0x18 + 6);
    }

    #[test]
    fn palette_is_stored_bgr() {
        let mut file = ContainerBuilder::new(1, 1).build();
        file[0x16] = 1;
        file.splice(0x18..0x18, [10, 20, 30]);
        let c = parse_header(&file).unwrap();
        assert_eq!(c.palette[0], Rgb { r: 30, g: 20, b: 10 });
    }

    #[test]
    fn too_short() {
        let file = ContainerBuilder::new(1, 1).build();
        assert_eq!(
            parse_header(&file[..23]),
            Err(FormatError::TooShort { len: 23 })
        );
        assert_eq!(parse_header(&[]), Err(FormatError::TooShort { len: 0 }));
    }

    #[test]
    fn bad_magic() {
        let mut file = ContainerBuilder::new(1, 1).build();
        file[7] = b'!';
        assert!(matches!(parse_header(&file), Err(FormatError::BadMagic { .. })));
    }

    #[test]
    fn palette_past_end() {
        let mut file = ContainerBuilder::new(1, 1).build();
        file.truncate(0x18);
        file[0x16] = 3;
        file.extend_from_slice(&[0; 5]);
        assert_eq!(
            parse_header(&file),
            Err(FormatError::PaletteTruncated {
                entries: 3,
                available: 5
            })
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let file = ContainerBuilder::new(7, 9)
            .palette(vec![Rgb::default(); 4])
            .direct(&[1, 2, 3])
            .build();
        assert_eq!(parse_header(&file), parse_header(&file));
    }

    #[test]
    fn stream_starts_after_palette() {
        let file = ContainerBuilder::new(3, 1)
            .palette(vec![Rgb::default(); 2])
            .direct(&[9])
            .build();
        let c = parse_header(&file).unwrap();
        let stream = compressed_stream(&file, &c);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream[1], !9u8);
    }
}
