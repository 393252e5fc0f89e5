//! Decoder for chunk type 0x2007 = color profile.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};

/// Profile flag: use the special fixed gamma.
pub const COLOR_PROFILE_FIXED_GAMMA: u16 = 0x0001;

/// Magic for a color profile chunk - Color Profile.
///
/// Declares the color space the document's RGB values live in.  The
/// chunk is laid out as follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      2 |   type   | 0 = none, 1 = sRGB, 2 = embedded ICC profile.
///        2 |      2 |   flags  | 1 = use the special fixed gamma below.
///        4 |      4 |   gamma  | Fixed gamma, 16.16 fixed point.  1.0 is linear.
///        8 |      8 | reserved | Unused space, set to zeroes.
///
/// ICC profiles continue with a 4-byte data length and the profile
/// bytes.  The profile is carried as an opaque blob; interpreting or
/// applying it is the consumer's business.
pub const ASE_COLOR_PROFILE: u16 = 0x2007;

/// Color profile kind tag.
#[derive(Clone,Debug,PartialEq)]
pub enum ColorProfileKind {
    None,
    Srgb,
    Icc(Vec<u8>),
}

/// Color space declaration, carried as opaque metadata.
#[derive(Clone,Debug,PartialEq)]
pub struct ColorProfile {
    pub kind: ColorProfileKind,
    pub flags: u16,

    /// Fixed gamma, 16.16 fixed point.
    pub gamma_fixed: i32,
}

impl ColorProfile {
    /// Fixed gamma as a float.
    pub fn gamma(&self) -> f64 {
        self.gamma_fixed as f64 / 65536.0
    }
}

/// Decode a color profile chunk.
pub fn decode_color_profile(src: &[u8])
        -> AseResult<ColorProfile> {
    let mut r = Cursor::new(src);

    let kind = r.read_u16::<LE>()?;
    let flags = r.read_u16::<LE>()?;
    let gamma_fixed = r.read_i32::<LE>()?;
    let mut reserved = [0; 8];
    r.read_exact(&mut reserved)?;

    let kind = match kind {
        0 => ColorProfileKind::None,
        1 => ColorProfileKind::Srgb,
        2 => {
            let len = r.read_u32::<LE>()? as usize;
            let pos = r.position() as usize;
            if pos + len > src.len() {
                return Err(AseError::Corrupted);
            }
            ColorProfileKind::Icc(src[pos..(pos + len)].to_vec())
        },
        _ => return Err(AseError::Unsupported),
    };

    Ok(ColorProfile {
        kind: kind,
        flags: flags,
        gamma_fixed: gamma_fixed,
    })
}

#[cfg(test)]
mod tests {
    use ::AseError;
    use super::{ColorProfileKind,decode_color_profile};

    #[test]
    fn test_decode_srgb_profile() {
        let src = [
            0x01, 0x00,             // type: sRGB
            0x00, 0x00,             // flags
            0x00, 0x00, 0x01, 0x00, // gamma 1.0
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00 ];

        let res = decode_color_profile(&src);
        assert!(res.is_ok());
        let profile = res.unwrap();

        assert_eq!(profile.kind, ColorProfileKind::Srgb);
        assert_eq!(profile.gamma(), 1.0);
    }

    #[test]
    fn test_decode_icc_profile_blob() {
        let src = [
            0x02, 0x00,             // type: ICC
            0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00, // blob length 3
            0x0A, 0x0B, 0x0C ];

        let profile = decode_color_profile(&src).unwrap();

        assert_eq!(profile.kind,
                ColorProfileKind::Icc(vec![0x0A, 0x0B, 0x0C]));
    }

    #[test]
    fn test_decode_icc_profile_short_blob() {
        let src = [
            0x02, 0x00,
            0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0xFF, 0x00, 0x00, 0x00, // blob length 255, but 2 bytes follow
            0x0A, 0x0B ];

        match decode_color_profile(&src) {
            Err(AseError::Corrupted) => (),
            _ => panic!("expected corrupted"),
        }
    }
}
