//! Frame compositing.

use std::cmp::min;

use ::{AseError,AseResult,Raster,RasterMut};
use ase::AseFile;
use cel::Image;
use chunk::Chunk;
use layer::effectively_visible;

impl AseFile {
    /// Composite one frame into a new raster sized to the canvas.
    ///
    /// Cels are painted in file order, bottom layer first, using
    /// "over" alpha blending.  Cels on hidden layers, or on layers
    /// under a hidden group, are skipped.
    pub fn render_frame(&self, frame_index: usize)
            -> AseResult<Raster> {
        let mut raster = Raster::new(self.width(), self.height());
        self.render_frame_into(frame_index, &mut raster.as_mut())?;
        Ok(raster)
    }

    /// Composite one frame into a caller-supplied raster.
    ///
    /// The destination window must match the canvas dimensions.  It
    /// is cleared to transparent black before painting, so composing
    /// the same frame twice yields the same pixels.
    pub fn render_frame_into(&self, frame_index: usize, dst: &mut RasterMut)
            -> AseResult<()> {
        if (dst.w != self.width()) || (dst.h != self.height()) {
            return Err(AseError::WrongResolution);
        }
        let frame = match self.frame(frame_index) {
            Some(frame) => frame,
            None => return Err(AseError::BadFrameIndex),
        };

        clear(dst);

        for chunk in frame.chunks.iter() {
            let cel = match *chunk {
                Chunk::Cel(ref cel) => cel,
                _ => continue,
            };

            // Checked at load time; re-checked here so a dangling
            // index fails loudly instead of painting wrong pixels.
            if cel.layer_index >= self.layers().len() {
                return Err(AseError::Corrupted);
            }
            if !effectively_visible(self.layers(), cel.layer_index) {
                continue;
            }

            // Linked, tilemap, and zero-area cels carry no pixels.
            if let Some(img) = cel.image() {
                blit_over(dst, img, cel.x as isize, cel.y as isize);
            }
        }

        Ok(())
    }
}

/// Clear the destination window to transparent black.
fn clear(dst: &mut RasterMut) {
    for row in 0..dst.h {
        let start = 4 * (dst.stride * (dst.y + row) + dst.x);
        for b in dst.buf[start..(start + 4 * dst.w)].iter_mut() {
            *b = 0;
        }
    }
}

/// Alpha-composite an image onto the destination at the given offset,
/// clipping to the destination window.
fn blit_over(dst: &mut RasterMut, img: &Image, x: isize, y: isize) {
    // Clip against each edge; offsets may be negative or push the
    // image partially or wholly off-canvas.
    let sx = if x < 0 { (-x) as usize } else { 0 };
    let sy = if y < 0 { (-y) as usize } else { 0 };
    let dx = if x > 0 { x as usize } else { 0 };
    let dy = if y > 0 { y as usize } else { 0 };
    if sx >= img.w || sy >= img.h || dx >= dst.w || dy >= dst.h {
        return;
    }

    let w = min(img.w - sx, dst.w - dx);
    let h = min(img.h - sy, dst.h - dy);

    for row in 0..h {
        let sstart = img.stride * (sy + row) + 4 * sx;
        let dstart = 4 * (dst.stride * (dst.y + dy + row) + dst.x + dx);
        let src_row = &img.pixels[sstart..(sstart + 4 * w)];
        let dst_row = &mut dst.buf[dstart..(dstart + 4 * w)];

        for (d, s) in dst_row.chunks_mut(4).zip(src_row.chunks(4)) {
            blend_over(d, s);
        }
    }
}

/// Non-premultiplied "over" blend of one source pixel onto one
/// destination pixel.
fn blend_over(dst: &mut [u8], src: &[u8]) {
    let sa = src[3] as u32;
    if sa == 255 {
        dst.copy_from_slice(src);
        return;
    }
    if sa == 0 {
        return;
    }

    let da = (dst[3] as u32) * (255 - sa) / 255;
    let oa = sa + da;
    if oa == 0 {
        for b in dst.iter_mut() {
            *b = 0;
        }
        return;
    }

    for c in 0..3 {
        let sc = src[c] as u32;
        let dc = dst[c] as u32;
        dst[c] = ((sc * sa + dc * da) / oa) as u8;
    }
    dst[3] = oa as u8;
}
