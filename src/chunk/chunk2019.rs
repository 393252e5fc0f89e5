//! Decoder for chunk type 0x2019 = palette.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use chunk::read_string;
use palette::{Palette,PaletteEntry,MAX_PALETTE_ENTRIES};

/// Per-entry flag: the entry carries a name string.
pub const PALETTE_ENTRY_HAS_NAME: u16 = 0x0001;

/// Magic for a palette chunk - New Palette.
///
/// Carries RGBA palette entries over an explicit index range,
/// superseding the old palette chunk.  The chunk is laid out as
/// follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | New palette size (total number of entries).
///        4 |      4 |   first  | First color index to change.
///        8 |      4 |   last   | Last color index to change, inclusive.
///       12 |      8 | reserved | Unused space, set to zeroes.
///
/// Followed by `last - first + 1` entries:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   flags  | 1 = entry has a name.
///        2 |      1 |    red   | Red component, 0 to 255.
///        3 |      1 |   green  | Green component, 0 to 255.
///        4 |      1 |    blue  | Blue component, 0 to 255.
///        5 |      1 |   alpha  | Alpha component, 0 to 255.
///        6 |    var |   name   | Prefixed string, present when flags bit 0 is set.
pub const ASE_PALETTE: u16 = 0x2019;

/// Decode a palette chunk.
pub fn decode_palette(src: &[u8])
        -> AseResult<Palette> {
    let mut r = Cursor::new(src);

    let _size = r.read_u32::<LE>()?;
    let first = r.read_u32::<LE>()?;
    let last = r.read_u32::<LE>()?;
    let mut reserved = [0; 8];
    r.read_exact(&mut reserved)?;

    if last < first {
        return Err(AseError::Corrupted);
    }
    if (last as usize) >= MAX_PALETTE_ENTRIES {
        return Err(AseError::ExceededLimit);
    }

    let mut pal = Palette::new();
    for idx in (first as usize)..(last as usize + 1) {
        let flags = r.read_u16::<LE>()?;
        let mut rgba = [0; 4];
        r.read_exact(&mut rgba)?;

        let name = if flags & PALETTE_ENTRY_HAS_NAME != 0 {
            Some(read_string(&mut r)?)
        } else {
            None
        };

        pal.set(idx, PaletteEntry {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
            name: name,
        });
    }

    Ok(pal)
}
