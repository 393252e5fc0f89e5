//! Decoder for chunk type 0x2004 = layer.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use chunk::read_string;
use layer::{Layer,LayerType};

/// Magic for a layer chunk - Layer.
///
/// One layer chunk exists for every layer in the document, all inside
/// the first frame, in stacking order (bottom first).  The chunk is
/// laid out as follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   flags  | Bit set, see the LAYER_* constants.
///        2 |      2 |   type   | 0 = normal, 1 = group, 2 = tilemap.
///        4 |      2 |   level  | Child level relative to the previous layer; drives group nesting.
///        6 |      2 |  width   | Default width in pixels, ignored.
///        8 |      2 |  height  | Default height in pixels, ignored.
///       10 |      2 |   blend  | Blend mode, normal layers only.
///       12 |      1 |  opacity | Layer opacity, valid when the header flags say so.
///       13 |      3 | reserved | Unused space, set to zeroes.
///       16 |    var |   name   | Prefixed string.
///       var|      4 |  tileset | Tileset index, tilemap layers only.
pub const ASE_LAYER: u16 = 0x2004;

/// Decode a layer chunk.
///
/// The parent back-reference starts unset; the document resolves the
/// hierarchy once all layers of the first frame are collected.
pub fn decode_layer(src: &[u8])
        -> AseResult<Layer> {
    let mut r = Cursor::new(src);

    let flags = r.read_u16::<LE>()?;
    let layer_type = r.read_u16::<LE>()?;
    let child_level = r.read_u16::<LE>()?;
    let _default_w = r.read_u16::<LE>()?;
    let _default_h = r.read_u16::<LE>()?;
    let blend = r.read_u16::<LE>()?;
    let opacity = r.read_u8()?;
    let mut reserved = [0; 3];
    r.read_exact(&mut reserved)?;
    let name = read_string(&mut r)?;

    let layer_type = match layer_type {
        0 => LayerType::Normal,
        1 => LayerType::Group,
        2 => LayerType::Tilemap,
        _ => return Err(AseError::Unsupported),
    };

    let tileset = if layer_type == LayerType::Tilemap {
        Some(r.read_u32::<LE>()?)
    } else {
        None
    };

    Ok(Layer {
        name: name,
        flags: flags,
        layer_type: layer_type,
        child_level: child_level,
        blend: blend,
        opacity: opacity,
        parent: None,
        tileset: tileset,
    })
}
