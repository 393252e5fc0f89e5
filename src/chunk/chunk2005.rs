//! Decoder for chunk type 0x2005 = cel.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use cel::{Cel,CelData,CelKind};

/// Magic for a cel chunk - Cel.
///
/// Places one layer's pixel content within the frame.  The chunk is
/// laid out as follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   layer  | Index into the document's layer list.
///        2 |      2 |     x    | X position on the canvas, signed.
///        4 |      2 |     y    | Y position on the canvas, signed.
///        6 |      1 |  opacity | Cel opacity.
///        7 |      2 |   type   | 0 = raw, 1 = linked, 2 = compressed, 3 = compressed tilemap.
///        9 |      7 | reserved | Unused space, set to zeroes.
///
/// Raw and compressed cels continue with a 2-byte width, a 2-byte
/// height, and the pixel payload (zlib-deflated for compressed cels).
/// Linked cels continue with the 2-byte index of the frame holding
/// the source cel.  Compressed tilemap cels keep their payload
/// opaque; tile semantics are not resolved here.
pub const ASE_CEL: u16 = 0x2005;

/// Decode a cel chunk.
///
/// Raw and compressed pixel payloads are captured unexpanded; the
/// document expands them once the palette is resolved.
pub fn decode_cel(src: &[u8])
        -> AseResult<Cel> {
    let mut r = Cursor::new(src);

    let layer_index = r.read_u16::<LE>()?;
    let x = r.read_i16::<LE>()?;
    let y = r.read_i16::<LE>()?;
    let opacity = r.read_u8()?;
    let cel_type = r.read_u16::<LE>()?;
    let mut reserved = [0; 7];
    r.read_exact(&mut reserved)?;

    let (kind, data) = match cel_type {
        0 | 2 => {
            let compressed = cel_type == 2;
            let w = r.read_u16::<LE>()?;
            let h = r.read_u16::<LE>()?;
            let pos = r.position() as usize;

            let kind = if compressed {
                CelKind::Compressed
            } else {
                CelKind::Raw
            };
            (kind, CelData::Pending {
                compressed: compressed,
                w: w,
                h: h,
                data: src[pos..].to_vec(),
            })
        },
        1 => {
            let frame = r.read_u16::<LE>()?;
            (CelKind::Linked, CelData::Linked(frame))
        },
        3 => {
            let pos = r.position() as usize;
            (CelKind::CompressedTilemap, CelData::Tilemap(src[pos..].to_vec()))
        },
        _ => return Err(AseError::Unsupported),
    };

    Ok(Cel {
        layer_index: layer_index as usize,
        x: x,
        y: y,
        opacity: opacity,
        kind: kind,
        data: data,
    })
}
