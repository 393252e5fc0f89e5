//! Cel records and pixel expansion.

use std::io::Read;
use std::mem;
use flate2::read::ZlibDecoder;

use ::{AseError,AseResult};
use ase::ColorDepth;
use palette::Palette;

/// Maximum pixel area a single cel may declare.
///
/// Bounds the decode buffer allocation; a corrupt file can declare
/// up to 65535x65535 pixels in two header fields.
pub const MAX_CEL_PIXELS: u64 = 1 << 26;

/// Cel source encoding tag, as stored in the file.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum CelKind {
    Raw,
    Linked,
    Compressed,
    CompressedTilemap,
}

/// Decoded RGBA pixel buffer.
///
/// Rows are stored top to bottom; `stride` is the row-to-row distance
/// in bytes (always `4 * w` as built here).
#[derive(Clone,Debug,PartialEq)]
pub struct Image {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub pixels: Vec<u8>,
}

/// The placement of one layer's pixel content within one frame.
#[derive(Clone,Debug)]
pub struct Cel {
    /// Index into the document's layer list.
    pub layer_index: usize,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub kind: CelKind,

    pub(crate) data: CelData,
}

/// Payload states of a cel.
///
/// Raw and zlib payloads are captured as `Pending` when the chunk is
/// decoded and expanded to `Image` once the document's palette is
/// resolved (indexed-depth expansion needs it).
#[derive(Clone,Debug)]
pub(crate) enum CelData {
    Pending {
        compressed: bool,
        w: u16,
        h: u16,
        data: Vec<u8>,
    },
    Image(Image),
    Linked(u16),
    Tilemap(Vec<u8>),
    Empty,
}

impl Cel {
    /// Decoded RGBA image, if the cel carries pixels.
    pub fn image(&self) -> Option<&Image> {
        match self.data {
            CelData::Image(ref img) => Some(img),
            _ => None,
        }
    }

    /// Frame index this cel links to, for linked cels.
    pub fn linked_frame(&self) -> Option<usize> {
        match self.data {
            CelData::Linked(frame) => Some(frame as usize),
            _ => None,
        }
    }

    /// Raw tilemap payload, for compressed-tilemap cels.
    pub fn tilemap_data(&self) -> Option<&[u8]> {
        match self.data {
            CelData::Tilemap(ref data) => Some(&data[..]),
            _ => None,
        }
    }

    /// Expand a pending pixel payload into an RGBA image.
    ///
    /// Zero-area cels become `Empty` without error.  Linked and
    /// tilemap cels are left untouched.
    pub(crate) fn expand(&mut self, depth: ColorDepth, pal: &Palette)
            -> AseResult<()> {
        let (compressed, w, h, data) = match self.data {
            CelData::Pending { compressed, w, h, ref mut data } =>
                (compressed, w, h, mem::replace(data, Vec::new())),
            _ => return Ok(()),
        };

        if w == 0 || h == 0 {
            self.data = CelData::Empty;
            return Ok(());
        }

        let num_pixels = (w as u64) * (h as u64);
        if num_pixels > MAX_CEL_PIXELS {
            return Err(AseError::ExceededLimit);
        }

        let num_pixels = num_pixels as usize;
        let src_len = num_pixels * depth.bytes_per_pixel();
        let src = if compressed {
            inflate(&data, src_len)?
        } else {
            data
        };
        if src.len() < src_len {
            return Err(AseError::Corrupted);
        }

        let mut pixels = vec![0; 4 * num_pixels];
        match depth {
            ColorDepth::Indexed => {
                for i in 0..num_pixels {
                    let rgba = pal.rgba(src[i] as usize);
                    pixels[(4 * i)..(4 * i + 4)].copy_from_slice(&rgba);
                }
            },
            ColorDepth::Grayscale => {
                for i in 0..num_pixels {
                    let v = src[2 * i];
                    let a = src[2 * i + 1];
                    pixels[(4 * i)..(4 * i + 4)].copy_from_slice(&[v, v, v, a]);
                }
            },
            ColorDepth::Rgba => {
                pixels.copy_from_slice(&src[..(4 * num_pixels)]);
            },
        }

        self.data = CelData::Image(Image {
            w: w as usize,
            h: h as usize,
            stride: 4 * w as usize,
            pixels: pixels,
        });
        Ok(())
    }
}

/// Inflate a zlib stream to exactly the expected length.
///
/// The reader is capped at the expected length, so a corrupt stream
/// cannot balloon the allocation.
fn inflate(src: &[u8], expected: usize) -> AseResult<Vec<u8>> {
    let mut out = Vec::with_capacity(expected);
    let mut z = ZlibDecoder::new(src);

    match z.take(expected as u64).read_to_end(&mut out) {
        Ok(_) => (),
        Err(_) => return Err(AseError::Corrupted),
    }
    if out.len() < expected {
        return Err(AseError::Corrupted);
    }

    Ok(out)
}
