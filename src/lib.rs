//! This crate provides routines for decoding Aseprite ASE/ASEPRITE
//! animation files, compositing their layered frames into RGBA
//! rasters, and driving playback or batch export of the result.

extern crate byteorder;
extern crate flate2;
#[macro_use]
extern crate log;

pub use errcode::AseError;
pub use errcode::AseResult;
pub use ase::{AseFile,ColorDepth,Frame};
pub use ase::{ASE_FILE_MAGIC,ASE_FRAME_MAGIC};
pub use ase::{SIZE_OF_ASE_HEADER,SIZE_OF_FRAME_HEADER,SIZE_OF_CHUNK};
pub use cel::{Cel,CelKind,Image};
pub use cel::MAX_CEL_PIXELS;
pub use chunk::Chunk;
pub use chunk::{ColorProfile,ColorProfileKind};
pub use chunk::{LoopDirection,Tag};
pub use layer::{Layer,LayerType};
pub use layer::{LAYER_VISIBLE,LAYER_EDITABLE,LAYER_LOCK_MOVEMENT,
        LAYER_BACKGROUND,LAYER_PREFER_LINKED_CELS,LAYER_COLLAPSED,
        LAYER_REFERENCE};
pub use palette::{Palette,PaletteEntry};
pub use palette::MAX_PALETTE_ENTRIES;
pub use player::{ExportFrame,Playback};

pub mod chunk;
pub mod errcode;
mod ase;
mod cel;
mod layer;
mod palette;
mod player;
mod raster;
mod render;
#[cfg(test)]
mod testutil;

/// Owned RGBA raster, as produced by frame compositing.
///
/// Pixels are stored row-major, 4 bytes (R, G, B, A) per pixel, with
/// no padding between rows.
pub struct Raster {
    pub w: usize,
    pub h: usize,
    pub buf: Vec<u8>,
}

/// Mutable raster backed by caller-supplied RGBA memory.
///
/// The raster may be positioned on a sub-window of the buffer via an
/// (x, y) offset and a stride.  Offsets and stride are measured in
/// pixels; every pixel occupies 4 bytes (R, G, B, A) in the buffer.
pub struct RasterMut<'a> {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub buf: &'a mut [u8],
}
