//! Playback driver and batch exporter.

use ::{AseResult,Raster};
use ase::AseFile;

/// One exported frame: the composited raster and its display
/// duration.
pub struct ExportFrame {
    pub raster: Raster,

    /// Display duration in milliseconds.
    pub duration_ms: u16,
}

/// Live playback state over a decoded document.
///
/// Holds an elapsed-time accumulator and the current frame index.
/// The animation loops unconditionally; tag ranges do not scope
/// playback.
pub struct Playback<'a> {
    file: &'a AseFile,
    frame: usize,
    elapsed: u64,
}

impl AseFile {
    /// Start playback at frame 0.
    pub fn playback(&self) -> Playback {
        Playback {
            file: self,
            frame: 0,
            elapsed: 0,
        }
    }

    /// Composite every frame in document order, pairing each raster
    /// with its display duration.
    ///
    /// The sequence is what an animated-image encoder consumes.
    pub fn export_sequence(&self)
            -> AseResult<Vec<ExportFrame>> {
        let mut seq = Vec::with_capacity(self.frame_count());

        for idx in 0..self.frame_count() {
            seq.push(ExportFrame {
                raster: self.render_frame(idx)?,
                duration_ms: self.frames()[idx].duration_ms,
            });
        }

        Ok(seq)
    }
}

impl<'a> Playback<'a> {
    /// Advance playback by the given delta and composite whatever
    /// frame is current afterwards.
    ///
    /// The accumulator is reduced modulo the total animation duration
    /// first, so a huge delta costs at most one pass over the frame
    /// list.  If every frame has zero duration the cursor does not
    /// advance.
    pub fn advance(&mut self, delta_ms: u32)
            -> AseResult<Raster> {
        self.elapsed = self.elapsed + delta_ms as u64;

        let total: u64 = self.file.frames().iter()
                .map(|f| f.duration_ms as u64)
                .sum();
        if total > 0 {
            // A whole number of loops lands back on the same frame.
            self.elapsed = self.elapsed % total;

            while self.elapsed >= self.duration(self.frame) {
                self.elapsed = self.elapsed - self.duration(self.frame);
                self.frame = (self.frame + 1) % self.file.frame_count();
            }
        }

        self.file.render_frame(self.frame)
    }

    /// Get the current frame index.
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Rewind to frame 0 with an empty accumulator.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0;
    }

    fn duration(&self, idx: usize) -> u64 {
        self.file.frames()[idx].duration_ms as u64
    }
}
