//! Raster implementation.

use ::{Raster,RasterMut};

impl Raster {
    /// Allocate a new transparent-black raster of the given dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// let raster = ase::Raster::new(320, 200);
    /// assert_eq!(raster.buf.len(), 4 * 320 * 200);
    /// ```
    pub fn new(w: usize, h: usize) -> Self {
        Raster {
            w: w,
            h: h,
            buf: vec![0; 4 * w * h],
        }
    }

    /// Get the RGBA value of a single pixel.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.w && y < self.h);
        let off = 4 * (self.w * y + x);
        [self.buf[off], self.buf[off + 1], self.buf[off + 2], self.buf[off + 3]]
    }

    /// Borrow the raster as a mutable destination window covering the
    /// whole buffer.
    pub fn as_mut(&mut self) -> RasterMut {
        RasterMut::new(self.w, self.h, &mut self.buf)
    }
}

impl<'a> RasterMut<'a> {
    /// Allocate a new raster for the given RGBA memory slice.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// let mut buf = [0; 4 * SCREEN_W * SCREEN_H];
    ///
    /// ase::RasterMut::new(SCREEN_W, SCREEN_H, &mut buf);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a mut [u8]) -> Self {
        Self::with_offset(0, 0, w, h, w, buf)
    }

    /// Allocate a new raster for the given RGBA memory slice, with an
    /// offset and stride.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// let mut buf = [0; 4 * SCREEN_W * SCREEN_H];
    ///
    /// ase::RasterMut::with_offset(0, 0, SCREEN_W, SCREEN_H, SCREEN_W, &mut buf);
    /// ```
    pub fn with_offset(
            x: usize, y: usize, w: usize, h: usize, stride: usize,
            buf: &'a mut [u8])
            -> Self {
        assert!(x + w <= stride);
        assert!(4 * stride * (y + h) <= buf.len());

        RasterMut {
            x: x,
            y: y,
            w: w,
            h: h,
            stride: stride,
            buf: buf,
        }
    }
}
