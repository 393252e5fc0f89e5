//! ASE chunk decoding subroutines.

macro_rules! module {
    ($e:ident) => {
        pub use self::$e::*;
        mod $e;
    };
}

use std::io::Read;
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::AseResult;
use cel::Cel;
use layer::Layer;
use palette::Palette;

module!(chunk0004);
module!(chunk2004);
module!(chunk2005);
module!(chunk2007);
module!(chunk2018);
module!(chunk2019);

/*--------------------------------------------------------------*/

/// Magic for a cel extra chunk - precise cel placement.
///
/// Retained as opaque data.
pub const ASE_CEL_EXTRA: u16 = 0x2006;

/// Magic for a mask chunk.  Deprecated by the format; retained as
/// opaque data.
pub const ASE_MASK: u16 = 0x2016;

/// Magic for a path chunk.  Never written by the format's editor;
/// retained as opaque data.
pub const ASE_PATH: u16 = 0x2017;

/// Magic for a user data chunk - free-form text/color attached to the
/// preceding chunk.
///
/// Retained as opaque data.
pub const ASE_USER_DATA: u16 = 0x2020;

/// Magic for a slice chunk - named sub-regions of the canvas.
///
/// Retained as opaque data.
pub const ASE_SLICE: u16 = 0x2022;

/// Magic for a tileset chunk - tile pixel data for tilemap layers.
///
/// Retained as opaque data.
pub const ASE_TILESET: u16 = 0x2023;

/// One decoded chunk.
///
/// Unrecognized chunk types are retained verbatim, tag and payload,
/// so that newer writers' data survives a decode pass.
#[derive(Clone,Debug)]
pub enum Chunk {
    Palette(Palette),
    Layer(Layer),
    Cel(Cel),
    Tags(Vec<Tag>),
    ColorProfile(ColorProfile),
    Unknown(u16, Vec<u8>),
}

/*--------------------------------------------------------------*/

/// Decode a chunk, based on the chunk type.
pub fn decode_chunk(magic: u16, data: Vec<u8>) -> AseResult<Chunk> {
    match magic {
        ASE_OLD_PALETTE | ASE_OLD_PALETTE_ALT =>
            Ok(Chunk::Palette(decode_old_palette(&data)?)),
        ASE_PALETTE =>
            Ok(Chunk::Palette(decode_palette(&data)?)),
        ASE_LAYER =>
            Ok(Chunk::Layer(decode_layer(&data)?)),
        ASE_CEL =>
            Ok(Chunk::Cel(decode_cel(&data)?)),
        ASE_COLOR_PROFILE =>
            Ok(Chunk::ColorProfile(decode_color_profile(&data)?)),
        ASE_TAGS =>
            Ok(Chunk::Tags(decode_tags(&data)?)),
        _ => Ok(Chunk::Unknown(magic, data)),
    }
}

/// Read a length-prefixed string: u16 byte length, then that many
/// bytes of text (not null-terminated).
///
/// Invalid UTF-8 is replaced rather than rejected; names are labels,
/// not structural data.
pub(crate) fn read_string<R: Read>(r: &mut R) -> AseResult<String> {
    let len = r.read_u16::<LE>()? as usize;
    let mut buf = vec![0; len];
    r.read_exact(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
