//! Indexed color table.

/// Maximum number of palette entries a single chunk may declare.
///
/// Indexed cels address the palette through a single byte, so real
/// documents stay at or below 256 entries; the cap only exists to
/// bound allocation on corrupt declared ranges.
pub const MAX_PALETTE_ENTRIES: usize = 65536;

/// A single palette entry: an RGBA color and an optional name.
#[derive(Clone,Debug,PartialEq)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub name: Option<String>,
}

/// Indexed color table resolved from a palette chunk.
///
/// The table is sparse: indices skipped by the chunk encoding stay
/// unset, and lookups outside the populated range resolve to
/// transparent black.
#[derive(Clone,Debug,PartialEq)]
pub struct Palette {
    entries: Vec<Option<PaletteEntry>>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Palette {
            entries: Vec::new(),
        }
    }

    /// Number of slots in the table, including unset holes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no slot has been set.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    /// Set the entry at the given index, growing the table as needed.
    pub fn set(&mut self, idx: usize, entry: PaletteEntry) {
        if idx >= self.entries.len() {
            self.entries.resize(idx + 1, None);
        }
        self.entries[idx] = Some(entry);
    }

    /// Get the entry at the given index, if set.
    pub fn get(&self, idx: usize) -> Option<&PaletteEntry> {
        match self.entries.get(idx) {
            Some(&Some(ref e)) => Some(e),
            _ => None,
        }
    }

    /// Resolve an index to an RGBA value.
    ///
    /// Unset or out-of-range indices resolve to transparent black.
    pub fn rgba(&self, idx: usize) -> [u8; 4] {
        match self.get(idx) {
            Some(e) => [e.r, e.g, e.b, e.a],
            None => [0, 0, 0, 0],
        }
    }
}
