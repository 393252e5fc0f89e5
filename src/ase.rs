//! ASE container implementation.

use std::io::{Cursor,Read};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use ::{AseError,AseResult};
use chunk::{self,Chunk,ColorProfile,Tag,decode_chunk};
use layer::{Layer,build_hierarchy};
use palette::Palette;

/// Magic for an ASE file - Aseprite sprite files.
///
/// An ASE file begins with a 128-byte header, followed by one frame
/// chunk per animation frame.  All lengths and offsets are in bytes.
/// All integers are stored little-endian.
///
/// The file header is defined as follows:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the entire file, including this file header.
///        4 |      2 |   magic  | File format identifier.  Always 0xA5E0.
///        6 |      2 |  frames  | Number of frames in the animation.
///        8 |      2 |   width  | Canvas width in pixels.
///       10 |      2 |  height  | Canvas height in pixels.
///       12 |      2 |   depth  | Color depth in bits per pixel: 8 = indexed, 16 = grayscale, 32 = RGBA.
///       14 |      4 |   flags  | Bit 0: layer opacity has a valid value.
///       18 |      2 |   speed  | Milliseconds between frames.  Deprecated; frame headers carry durations.
///       20 |      8 | reserved | Two unused double words, set to zero.
///       28 |      1 |  transp  | Palette index of the transparent color in indexed sprites.
///       29 |      3 |  ignored | Unused space.
///       32 |      2 |  colors  | Number of colors (0 means 256 for old sprites).
///       34 |      1 |  pixelw  | Pixel width; pixel ratio is pixelw:pixelh.
///       35 |      1 |  pixelh  | Pixel height.
///       36 |      2 |   gridx  | X position of the grid, signed.
///       38 |      2 |   gridy  | Y position of the grid, signed.
///       40 |      2 |  gridw   | Grid width; zero when there is no grid.
///       42 |      2 |  gridh   | Grid height.
///       44 |     84 | reserved | Unused space, set to zeroes.
pub const ASE_FILE_MAGIC: u16 = 0xA5E0;

/// Magic for an ASE frame - ASE Frame Chunks.
///
/// One frame chunk exists for every frame in the animation, in
/// playback order.  Each frame starts with a 16-byte header that
/// describes the contents of the frame:
///
///   Offset | Length |   Name   | Description
///   ------:| ------:|:--------:| -----------------------------------
///        0 |      4 |   size   | The size of the frame, including this header and all subordinate chunks that follow.
///        4 |      2 |   magic  | Frame identifier.  Always 0xF1FA.
///        6 |      2 |  chunks  | Number of subordinate chunks.  0xFFFF means the real count is in the extended field.
///        8 |      2 | duration | Frame display duration, in milliseconds.
///       10 |      2 | reserved | Unused space, set to zeroes.
///       12 |      4 | extended | Extended chunk count, used when the 16-bit count reads 0xFFFF.
pub const ASE_FRAME_MAGIC: u16 = 0xF1FA;

/// Size of an ASE file header on disk.
pub const SIZE_OF_ASE_HEADER: usize = 128;

/// Size of an ASE frame header on disk.
pub const SIZE_OF_FRAME_HEADER: usize = 16;

/// Size of a chunk header on disk.
///
/// Immediately following the frame header are the frame's subordinate
/// data chunks.  Each chunk is formatted as follows:
///
///   Offset | Length | Name | Description
///   ------:| ------:|:----:| ---------------------------------------
///        0 |      4 | size | The size of the chunk, including this header.
///        4 |      2 | type | Data type identifier.
///        6 | size-6 | data | The chunk data.
///
/// The type value indicates what the chunk contains; chunk types
/// outside the recognized set are carried through as opaque data.
pub const SIZE_OF_CHUNK: usize = 6;

/// Color depth of the document, from the file header.
///
/// Every cel in the document stores its pixels at this depth.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum ColorDepth {
    /// 8 bits per pixel; each byte is a palette index.
    Indexed,

    /// 16 bits per pixel; value and alpha.
    Grayscale,

    /// 32 bits per pixel; red, green, blue, alpha.
    Rgba,
}

impl ColorDepth {
    /// Bits per pixel, as stored in the file header.
    pub fn bits(&self) -> u16 {
        match *self {
            ColorDepth::Indexed => 8,
            ColorDepth::Grayscale => 16,
            ColorDepth::Rgba => 32,
        }
    }

    /// Bytes per pixel in a cel's source payload.
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// ASE header.
#[allow(dead_code)]
struct AseHeader {
    size: u32,
    frame_count: u16,
    w: u16,
    h: u16,
    depth: ColorDepth,
    flags: u32,
    speed_ms: u16,
    transparent_index: u8,
    color_count: u16,
    pixel_w: u8,
    pixel_h: u8,
    grid_x: i16,
    grid_y: i16,
    grid_w: u16,
    grid_h: u16,
}

/// One animation frame: its decoded chunks, in file order, and its
/// display duration.
pub struct Frame {
    /// Display duration in milliseconds.
    pub duration_ms: u16,

    /// Decoded chunks, in file order.
    pub chunks: Vec<Chunk>,
}

/// A decoded ASE document.
///
/// Holds the header metadata, every frame's chunks, and the resolved
/// palette, layer list, tags, and color profile.  All pixel payloads
/// are expanded to RGBA by the time `read` returns; the value is
/// immutable afterwards, so frames may be composited from independent
/// threads without locking.
pub struct AseFile {
    hdr: AseHeader,
    frames: Vec<Frame>,
    palette: Palette,
    layers: Vec<Layer>,
    tags: Vec<Tag>,
    profile: Option<ColorProfile>,
}

/*--------------------------------------------------------------*/

impl AseFile {
    /// Decode an ASE document from a byte stream.
    ///
    /// The stream is consumed up to the end of the last frame.  Any
    /// structural inconsistency fails the whole load; there is no
    /// partial-document recovery.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    ///
    /// let file = File::open("ex.aseprite").unwrap();
    /// let ase = ase::AseFile::read(file).unwrap();
    /// ```
    pub fn read<R: Read>(mut r: R)
            -> AseResult<Self> {
        let hdr = read_ase_header(&mut r)?;

        let mut frames = Vec::with_capacity(hdr.frame_count as usize);
        for frame_num in 0..hdr.frame_count {
            frames.push(read_frame(&mut r, frame_num)?);
        }

        let palette = resolve_palette(&frames);
        let layers = resolve_layers(&frames);
        let tags = resolve_tags(&frames);
        let profile = resolve_color_profile(&frames);

        // Cels address layers by index; a dangling index would
        // otherwise surface at composite time.
        for frame in frames.iter() {
            for chunk in frame.chunks.iter() {
                if let Chunk::Cel(ref cel) = *chunk {
                    if cel.layer_index >= layers.len() {
                        return Err(AseError::Corrupted);
                    }
                }
            }
        }

        // Indexed expansion needs the resolved palette, so pixel
        // payloads are expanded only now.
        for frame in frames.iter_mut() {
            for chunk in frame.chunks.iter_mut() {
                if let Chunk::Cel(ref mut cel) = *chunk {
                    cel.expand(hdr.depth, &palette)?;
                }
            }
        }

        Ok(AseFile {
            hdr: hdr,
            frames: frames,
            palette: palette,
            layers: layers,
            tags: tags,
            profile: profile,
        })
    }

    /// Get the canvas width in pixels.
    pub fn width(&self) -> usize {
        self.hdr.w as usize
    }

    /// Get the canvas height in pixels.
    pub fn height(&self) -> usize {
        self.hdr.h as usize
    }

    /// Get the canvas dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Get the frame count.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Get one frame.
    pub fn frame(&self, idx: usize) -> Option<&Frame> {
        self.frames.get(idx)
    }

    /// Get the frames, in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get the document color depth.
    pub fn color_depth(&self) -> ColorDepth {
        self.hdr.depth
    }

    /// Get the document palette.
    ///
    /// Empty unless the first frame carries a palette chunk.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Get the layer list, in paint order (bottom first).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get one layer.
    pub fn layer(&self, idx: usize) -> Option<&Layer> {
        self.layers.get(idx)
    }

    /// Get the frame tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Look up a frame tag by name.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Get the color profile, if the document declares one.
    ///
    /// Carried as opaque metadata; never applied to pixel values.
    pub fn color_profile(&self) -> Option<&ColorProfile> {
        self.profile.as_ref()
    }

    /// Milliseconds between frames, from the file header.
    ///
    /// Deprecated by the format; per-frame durations drive playback.
    pub fn speed_ms(&self) -> u16 {
        self.hdr.speed_ms
    }

    /// Palette index of the transparent color in indexed sprites.
    pub fn transparent_index(&self) -> u8 {
        self.hdr.transparent_index
    }

    /// Pixel aspect ratio as (width, height); (1, 1) when square.
    pub fn pixel_ratio(&self) -> (u8, u8) {
        if self.hdr.pixel_w == 0 || self.hdr.pixel_h == 0 {
            (1, 1)
        } else {
            (self.hdr.pixel_w, self.hdr.pixel_h)
        }
    }

    /// Editor grid as (x, y, width, height); width 0 means no grid.
    pub fn grid(&self) -> (i16, i16, u16, u16) {
        (self.hdr.grid_x, self.hdr.grid_y, self.hdr.grid_w, self.hdr.grid_h)
    }
}

/*--------------------------------------------------------------*/

/// Read the ASE file header.
fn read_ase_header<R: Read>(r: &mut R)
        -> AseResult<AseHeader> {
    let mut buf = [0; SIZE_OF_ASE_HEADER];
    r.read_exact(&mut buf)?;

    let mut r = Cursor::new(&buf[..]);
    let size = r.read_u32::<LE>()?;
    let magic = r.read_u16::<LE>()?;

    if magic != ASE_FILE_MAGIC {
        return Err(AseError::BadMagic);
    }

    let frame_count = r.read_u16::<LE>()?;
    let width = r.read_u16::<LE>()?;
    let height = r.read_u16::<LE>()?;
    let depth = r.read_u16::<LE>()?;
    let flags = r.read_u32::<LE>()?;
    let speed_ms = r.read_u16::<LE>()?;
    let _reserved1 = r.read_u32::<LE>()?;
    let _reserved2 = r.read_u32::<LE>()?;
    let transparent_index = r.read_u8()?;
    let mut ignored = [0; 3];
    r.read_exact(&mut ignored)?;
    let color_count = r.read_u16::<LE>()?;
    let pixel_w = r.read_u8()?;
    let pixel_h = r.read_u8()?;
    let grid_x = r.read_i16::<LE>()?;
    let grid_y = r.read_i16::<LE>()?;
    let grid_w = r.read_u16::<LE>()?;
    let grid_h = r.read_u16::<LE>()?;

    if frame_count <= 0 || width <= 0 || height <= 0 {
        return Err(AseError::Corrupted);
    }

    let depth = match depth {
        8 => ColorDepth::Indexed,
        16 => ColorDepth::Grayscale,
        32 => ColorDepth::Rgba,
        _ => return Err(AseError::Unsupported),
    };

    Ok(AseHeader {
        size: size,
        frame_count: frame_count,
        w: width,
        h: height,
        depth: depth,
        flags: flags,
        speed_ms: speed_ms,
        transparent_index: transparent_index,
        color_count: color_count,
        pixel_w: pixel_w,
        pixel_h: pixel_h,
        grid_x: grid_x,
        grid_y: grid_y,
        grid_w: grid_w,
        grid_h: grid_h,
    })
}

/// Read one frame: its header, then all of its chunks.
fn read_frame<R: Read>(r: &mut R, frame_num: u16)
        -> AseResult<Frame> {
    let mut buf = [0; SIZE_OF_FRAME_HEADER];
    r.read_exact(&mut buf)?;

    let mut hr = Cursor::new(&buf[..]);
    let size = hr.read_u32::<LE>()?;
    let magic = hr.read_u16::<LE>()?;
    let num_chunks = hr.read_u16::<LE>()?;
    let duration_ms = hr.read_u16::<LE>()?;
    let _reserved = hr.read_u16::<LE>()?;
    let num_chunks_ext = hr.read_u32::<LE>()?;

    if magic != ASE_FRAME_MAGIC {
        return Err(AseError::BadMagic);
    }
    if (size as usize) < SIZE_OF_FRAME_HEADER {
        return Err(AseError::Corrupted);
    }

    let num_chunks = if num_chunks == 0xFFFF {
        num_chunks_ext as usize
    } else {
        num_chunks as usize
    };

    let mut chunks = Vec::new();
    let mut consumed = SIZE_OF_FRAME_HEADER as u64;

    for _ in 0..num_chunks {
        let chunk_size = r.read_u32::<LE>()?;
        let chunk_magic = r.read_u16::<LE>()?;

        if (chunk_size as usize) < SIZE_OF_CHUNK {
            return Err(AseError::Corrupted);
        }

        // Bounded by take, so a corrupt declared size cannot force
        // an allocation larger than the remaining input.
        let payload_size = chunk_size as u64 - SIZE_OF_CHUNK as u64;
        let mut payload = Vec::new();
        r.take(payload_size).read_to_end(&mut payload)?;
        if (payload.len() as u64) < payload_size {
            return Err(AseError::Corrupted);
        }

        match chunk_magic {
            chunk::ASE_OLD_PALETTE | chunk::ASE_OLD_PALETTE_ALT
                | chunk::ASE_LAYER | chunk::ASE_CEL
                | chunk::ASE_COLOR_PROFILE | chunk::ASE_TAGS
                | chunk::ASE_PALETTE
                | chunk::ASE_CEL_EXTRA | chunk::ASE_PATH
                | chunk::ASE_USER_DATA | chunk::ASE_SLICE
                | chunk::ASE_TILESET => (),

            chunk::ASE_MASK =>
                warn!("frame {} - deprecated mask chunk", frame_num),

            _ => warn!("frame {} - unrecognised chunk type 0x{:04X}",
                    frame_num, chunk_magic),
        }

        chunks.push(decode_chunk(chunk_magic, payload)?);
        consumed = consumed + chunk_size as u64;
    }

    // The chunk stream is self-delimiting, so a frame whose declared
    // size disagrees with its chunks is noted but tolerated.
    if consumed != size as u64 {
        warn!("frame {} - chunks cover {} bytes, frame header declares {}",
                frame_num, consumed, size);
    }

    Ok(Frame {
        duration_ms: duration_ms,
        chunks: chunks,
    })
}

/*--------------------------------------------------------------*/

/// Resolve the document palette: the first palette-bearing chunk in
/// frame 0 is authoritative, later ones are ignored.
fn resolve_palette(frames: &[Frame])
        -> Palette {
    let mut pal: Option<Palette> = None;

    for (frame_num, frame) in frames.iter().enumerate() {
        for chunk in frame.chunks.iter() {
            if let Chunk::Palette(ref p) = *chunk {
                if pal.is_none() && frame_num == 0 {
                    pal = Some(p.clone());
                } else {
                    debug!("ignoring extra palette chunk in frame {}",
                            frame_num);
                }
            }
        }
    }

    pal.unwrap_or_else(Palette::new)
}

/// Collect the layer list from frame 0 and resolve group nesting.
fn resolve_layers(frames: &[Frame])
        -> Vec<Layer> {
    let mut layers = Vec::new();

    if let Some(frame) = frames.first() {
        for chunk in frame.chunks.iter() {
            if let Chunk::Layer(ref layer) = *chunk {
                layers.push(layer.clone());
            }
        }
    }

    build_hierarchy(&mut layers);
    layers
}

/// Resolve the document's frame tags: first tags chunk wins.
fn resolve_tags(frames: &[Frame])
        -> Vec<Tag> {
    for (frame_num, frame) in frames.iter().enumerate() {
        for chunk in frame.chunks.iter() {
            if let Chunk::Tags(ref tags) = *chunk {
                if frame_num > 0 {
                    debug!("tags chunk found in frame {}", frame_num);
                }
                return tags.clone();
            }
        }
    }
    Vec::new()
}

/// Resolve the document's color profile: first profile chunk wins.
fn resolve_color_profile(frames: &[Frame])
        -> Option<ColorProfile> {
    for frame in frames.iter() {
        for chunk in frame.chunks.iter() {
            if let Chunk::ColorProfile(ref profile) = *chunk {
                return Some(profile.clone());
            }
        }
    }
    None
}

/*--------------------------------------------------------------*/
