//! Byte fixture builders shared by container-level tests.

use byteorder::LittleEndian as LE;
use byteorder::WriteBytesExt;

use ase::{ASE_FILE_MAGIC,ASE_FRAME_MAGIC};
use ase::{SIZE_OF_ASE_HEADER,SIZE_OF_FRAME_HEADER,SIZE_OF_CHUNK};
use chunk::{ASE_CEL,ASE_LAYER,ASE_PALETTE};

/// Build a 128-byte file header.
///
/// Fields past the color depth are zeroed; tests that care about them
/// patch the returned buffer.
pub fn build_header(file_size: u32, frames: u16, w: u16, h: u16, depth: u16)
        -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIZE_OF_ASE_HEADER);
    buf.write_u32::<LE>(file_size).unwrap();
    buf.write_u16::<LE>(ASE_FILE_MAGIC).unwrap();
    buf.write_u16::<LE>(frames).unwrap();
    buf.write_u16::<LE>(w).unwrap();
    buf.write_u16::<LE>(h).unwrap();
    buf.write_u16::<LE>(depth).unwrap();
    buf.resize(SIZE_OF_ASE_HEADER, 0);
    buf
}

/// Build one chunk: 6-byte header plus payload.
pub fn build_chunk(magic: u16, payload: &[u8])
        -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIZE_OF_CHUNK + payload.len());
    buf.write_u32::<LE>((SIZE_OF_CHUNK + payload.len()) as u32).unwrap();
    buf.write_u16::<LE>(magic).unwrap();
    buf.extend_from_slice(payload);
    buf
}

/// Build one frame: 16-byte header plus the given chunks.
pub fn build_frame(duration_ms: u16, chunks: &[Vec<u8>])
        -> Vec<u8> {
    build_frame_counted(duration_ms, chunks, false)
}

/// Build one frame using the 0xFFFF escape and the extended 32-bit
/// chunk count, regardless of how many chunks there are.
pub fn build_frame_extended(duration_ms: u16, chunks: &[Vec<u8>])
        -> Vec<u8> {
    build_frame_counted(duration_ms, chunks, true)
}

fn build_frame_counted(duration_ms: u16, chunks: &[Vec<u8>], extended: bool)
        -> Vec<u8> {
    let data_len: usize = chunks.iter().map(|c| c.len()).sum();
    let count = chunks.len();

    let mut buf = Vec::with_capacity(SIZE_OF_FRAME_HEADER + data_len);
    buf.write_u32::<LE>((SIZE_OF_FRAME_HEADER + data_len) as u32).unwrap();
    buf.write_u16::<LE>(ASE_FRAME_MAGIC).unwrap();
    if extended || count >= 0xFFFF {
        buf.write_u16::<LE>(0xFFFF).unwrap();
        buf.write_u16::<LE>(duration_ms).unwrap();
        buf.write_u16::<LE>(0).unwrap();
        buf.write_u32::<LE>(count as u32).unwrap();
    } else {
        buf.write_u16::<LE>(count as u16).unwrap();
        buf.write_u16::<LE>(duration_ms).unwrap();
        buf.write_u16::<LE>(0).unwrap();
        buf.write_u32::<LE>(0).unwrap();
    }
    for chunk in chunks {
        buf.extend_from_slice(chunk);
    }
    buf
}

/// Build a whole document: header plus frames, with the file size
/// field filled in.
pub fn build_document(w: u16, h: u16, depth: u16, frames: &[Vec<u8>])
        -> Vec<u8> {
    let data_len: usize = frames.iter().map(|f| f.len()).sum();
    let mut buf = build_header(
            (SIZE_OF_ASE_HEADER + data_len) as u32,
            frames.len() as u16, w, h, depth);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Build a new-palette chunk (0x2019) covering indices 0 to
/// `colors.len() - 1`, without entry names.
pub fn palette_chunk(colors: &[[u8; 4]])
        -> Vec<u8> {
    assert!(!colors.is_empty());

    let mut payload = Vec::new();
    payload.write_u32::<LE>(colors.len() as u32).unwrap();
    payload.write_u32::<LE>(0).unwrap();
    payload.write_u32::<LE>(colors.len() as u32 - 1).unwrap();
    payload.extend_from_slice(&[0; 8]);
    for rgba in colors {
        payload.write_u16::<LE>(0).unwrap();
        payload.extend_from_slice(rgba);
    }
    build_chunk(ASE_PALETTE, &payload)
}

/// Build a layer chunk (0x2004).
pub fn layer_chunk(flags: u16, layer_type: u16, child_level: u16, name: &str)
        -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u16::<LE>(flags).unwrap();
    payload.write_u16::<LE>(layer_type).unwrap();
    payload.write_u16::<LE>(child_level).unwrap();
    payload.write_u16::<LE>(0).unwrap();    // default width
    payload.write_u16::<LE>(0).unwrap();    // default height
    payload.write_u16::<LE>(0).unwrap();    // blend: normal
    payload.push(255);                      // opacity
    payload.extend_from_slice(&[0; 3]);
    payload.write_u16::<LE>(name.len() as u16).unwrap();
    payload.extend_from_slice(name.as_bytes());
    build_chunk(ASE_LAYER, &payload)
}

/// Build a raw cel chunk (0x2005).
pub fn cel_chunk(layer: u16, x: i16, y: i16, w: u16, h: u16, pixels: &[u8])
        -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u16::<LE>(layer).unwrap();
    payload.write_i16::<LE>(x).unwrap();
    payload.write_i16::<LE>(y).unwrap();
    payload.push(255);                      // opacity
    payload.write_u16::<LE>(0).unwrap();    // type: raw
    payload.extend_from_slice(&[0; 7]);
    payload.write_u16::<LE>(w).unwrap();
    payload.write_u16::<LE>(h).unwrap();
    payload.extend_from_slice(pixels);
    build_chunk(ASE_CEL, &payload)
}

/// Wrap raw bytes in a zlib stream built from stored deflate blocks.
///
/// No compressor involved, so test expectations stay byte-exact.
pub fn zlib_store(raw: &[u8])
        -> Vec<u8> {
    let mut buf = vec![0x78, 0x01];

    let mut chunks = raw.chunks(0xFFFF).peekable();
    if raw.is_empty() {
        buf.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF]);
    }
    while let Some(chunk) = chunks.next() {
        let bfinal = if chunks.peek().is_none() { 1 } else { 0 };
        buf.push(bfinal);
        buf.write_u16::<LE>(chunk.len() as u16).unwrap();
        buf.write_u16::<LE>(!(chunk.len() as u16)).unwrap();
        buf.extend_from_slice(chunk);
    }

    // Adler-32 of the uncompressed data, big-endian.
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &byte in raw {
        a = (a + byte as u32) % 65521;
        b = (b + a) % 65521;
    }
    buf.extend_from_slice(&[
            (b >> 8) as u8, b as u8,
            (a >> 8) as u8, a as u8 ]);

    buf
}
