//! Decoder for chunk type 0x2018 = frame tags.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::AseResult;
use super::read_string;

/// Magic for a frame tags chunk - Tags.
///
/// Names a set of frame ranges, e.g. "walk" or "idle".  The chunk
/// starts with:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   count  | Number of tags.
///        2 |      8 | reserved | Unused space, set to zeroes.
///
/// Followed by count tag records:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   from   | First frame in the range.
///        2 |      2 |    to    | Last frame in the range, inclusive.
///        4 |      1 |    dir   | 0 = forward, 1 = reverse, 2 = ping-pong.
///        5 |      8 | reserved | Unused space, set to zeroes.
///       13 |      3 |   color  | Tag color (RGB), an editor hint.
///       16 |      1 |   extra  | Ignored.
///       17 |    ... |   name   | Tag name, length-prefixed.
pub const ASE_TAGS: u16 = 0x2018;

/// Playback direction of a tagged frame range.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum LoopDirection {
    Forward,
    Reverse,
    PingPong,
}

/// A named range of frames.
#[derive(Clone,Debug)]
pub struct Tag {
    pub name: String,

    /// First frame in the range.
    pub from: u16,

    /// Last frame in the range, inclusive.
    pub to: u16,

    pub direction: LoopDirection,

    /// Tag color (RGB), an editor hint.
    pub color: [u8; 3],
}

/// Decode a frame tags chunk.
pub fn decode_tags(src: &[u8])
        -> AseResult<Vec<Tag>> {
    let mut r = Cursor::new(src);
    let mut tags = Vec::new();

    let count = r.read_u16::<LE>()?;
    let mut reserved = [0; 8];
    r.read_exact(&mut reserved)?;

    for _ in 0..count {
        let from = r.read_u16::<LE>()?;
        let to = r.read_u16::<LE>()?;
        let dir = r.read_u8()?;
        let mut reserved = [0; 8];
        r.read_exact(&mut reserved)?;
        let mut color = [0; 3];
        r.read_exact(&mut color)?;
        let _extra = r.read_u8()?;
        let name = read_string(&mut r)?;

        let direction = match dir {
            0 => LoopDirection::Forward,
            1 => LoopDirection::Reverse,
            2 => LoopDirection::PingPong,
            n => {
                warn!("tags: unknown loop direction {}", n);
                LoopDirection::Forward
            },
        };

        tags.push(Tag {
            name: name,
            from: from,
            to: to,
            direction: direction,
            color: color,
        });
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::{LoopDirection,decode_tags};

    #[test]
    fn test_decode_tags() {
        let src = [
            0x02, 0x00,             // 2 tags
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,

            0x00, 0x00,             // from 0
            0x03, 0x00,             // to 3
            0x00,                   // forward
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0xFF, 0x00, 0x00,       // red
            0x00,
            0x04, 0x00,             // name: "walk"
            b'w', b'a', b'l', b'k',

            0x04, 0x00,             // from 4
            0x04, 0x00,             // to 4
            0x02,                   // ping-pong
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0xFF, 0x00,       // green
            0x00,
            0x04, 0x00,             // name: "idle"
            b'i', b'd', b'l', b'e' ];

        let res = decode_tags(&src);
        assert!(res.is_ok());
        let tags = res.unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "walk");
        assert_eq!(tags[0].from, 0);
        assert_eq!(tags[0].to, 3);
        assert_eq!(tags[0].direction, LoopDirection::Forward);
        assert_eq!(tags[0].color, [0xFF, 0x00, 0x00]);
        assert_eq!(tags[1].name, "idle");
        assert_eq!(tags[1].direction, LoopDirection::PingPong);
    }

    #[test]
    fn test_decode_tags_unknown_direction() {
        let src = [
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,

            0x00, 0x00,
            0x01, 0x00,
            0x09,                   // unknown direction byte
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00,
            0x00,
            0x01, 0x00,
            b'x' ];

        let tags = decode_tags(&src).unwrap();

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].direction, LoopDirection::Forward);
    }
}
