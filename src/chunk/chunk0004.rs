//! Decoder for chunk type 0x0004 = old palette.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use palette::{Palette,PaletteEntry,MAX_PALETTE_ENTRIES};

/// Magic for an old palette chunk - Old Palette.
///
/// The palette data in this chunk is organized in packets.  The first
/// word following the chunk header is a count of the number of
/// packets in the chunk.
///
/// Each packet consists of a one-byte color index skip count, a
/// one-byte color count and three bytes of color information for each
/// color defined.
///
/// At the start of the chunk, the color index is assumed to be zero.
/// Before processing any colors in a packet, the color index skip
/// count is added to the current color index.  The number of colors
/// defined in the packet is retrieved.  A zero in this byte indicates
/// 256 colors follow.  The three bytes for each color define the red,
/// green, and blue components in that order, each ranging from 0 to
/// 255.  Alpha is not stored; entries are opaque.  The data to set
/// colors 2, 7, 8, and 9 would appear as follows:
///
/// ```text
///     2                       ; two packets
///     2,1,r,g,b               ; skip 2, set 1
///     4,3,r,g,b,r,g,b,r,g,b   ; skip 4, set 3
/// ```
pub const ASE_OLD_PALETTE: u16 = 0x0004;

/// Magic for the alternative old palette chunk.
///
/// Written by very old editors.  The packet layout is identical to
/// `ASE_OLD_PALETTE` and the component bytes are taken as-is.
pub const ASE_OLD_PALETTE_ALT: u16 = 0x0011;

/// Decode an old palette chunk.
pub fn decode_old_palette(src: &[u8])
        -> AseResult<Palette> {
    let mut r = Cursor::new(src);
    let mut pal = Palette::new();
    let mut idx = 0;

    let count = r.read_u16::<LE>()?;
    for _ in 0..count {
        let nskip = r.read_u8()? as usize;
        let ncopy = match r.read_u8()? {
            0 => 256 as usize,
            n => n as usize,
        };

        idx = idx + nskip;
        if idx + ncopy > MAX_PALETTE_ENTRIES {
            return Err(AseError::ExceededLimit);
        }

        for _ in 0..ncopy {
            let mut rgb = [0; 3];
            r.read_exact(&mut rgb)?;

            pal.set(idx, PaletteEntry {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
                a: 255,
                name: None,
            });
            idx = idx + 1;
        }
    }

    Ok(pal)
}

#[cfg(test)]
mod tests {
    use super::decode_old_palette;

    #[test]
    fn test_decode_old_palette() {
        let src = [
            0x02, 0x00, // count 2
            2, 1,       // skip 2, set 1
            0x0A, 0x0B, 0x0C,
            4, 3,       // skip 4, set 3
            0x2A, 0x2B, 0x2C, 0x3A, 0x3B, 0x3C, 0x4A, 0x4B, 0x4C ];

        let res = decode_old_palette(&src);
        assert!(res.is_ok());
        let pal = res.unwrap();

        assert_eq!(pal.len(), 10);
        assert_eq!(pal.rgba(2), [0x0A, 0x0B, 0x0C, 255]);
        assert_eq!(pal.rgba(7), [0x2A, 0x2B, 0x2C, 255]);
        assert_eq!(pal.rgba(8), [0x3A, 0x3B, 0x3C, 255]);
        assert_eq!(pal.rgba(9), [0x4A, 0x4B, 0x4C, 255]);

        // Skipped indices stay unset.
        assert_eq!(pal.rgba(0), [0, 0, 0, 0]);
        assert_eq!(pal.rgba(3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_old_palette_zero_count_means_256() {
        let mut src = vec![
            0x01, 0x00, // count 1
            0, 0 ];     // skip 0, set 256
        for i in 0..256 {
            src.push(i as u8);
            src.push(0);
            src.push(255 - i as u8);
        }

        let res = decode_old_palette(&src);
        assert!(res.is_ok());
        let pal = res.unwrap();

        assert_eq!(pal.len(), 256);
        assert_eq!(pal.rgba(0), [0, 0, 255, 255]);
        assert_eq!(pal.rgba(255), [255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_old_palette_truncated() {
        let src = [
            0x01, 0x00, // count 1
            0, 2,       // skip 0, set 2
            0x0A, 0x0B ];

        assert!(decode_old_palette(&src).is_err());
    }
}
