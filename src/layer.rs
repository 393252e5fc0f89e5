//! Layer records and the layer-group hierarchy.

/// The layer is visible in the editor and in composited output.
pub const LAYER_VISIBLE: u16 = 0x0001;

/// The layer is editable.
pub const LAYER_EDITABLE: u16 = 0x0002;

/// Layer movement is locked.
pub const LAYER_LOCK_MOVEMENT: u16 = 0x0004;

/// The layer is the background layer.
pub const LAYER_BACKGROUND: u16 = 0x0008;

/// The layer prefers linked cels.
pub const LAYER_PREFER_LINKED_CELS: u16 = 0x0010;

/// The layer group is displayed collapsed in the editor.
pub const LAYER_COLLAPSED: u16 = 0x0020;

/// The layer is a reference layer.
pub const LAYER_REFERENCE: u16 = 0x0040;

/// Layer type tag.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum LayerType {
    Normal,
    Group,
    Tilemap,
}

/// A paintable surface or group within the document.
///
/// Layers form a flat list in file order (paint order).  Nesting
/// under group layers is carried by `child_level` in the file and
/// resolved to `parent`, an index into the document's layer list,
/// when the document is loaded.
#[derive(Clone,Debug)]
pub struct Layer {
    pub name: String,
    pub flags: u16,
    pub layer_type: LayerType,
    pub child_level: u16,
    pub blend: u16,
    pub opacity: u8,

    /// Index of the nearest enclosing group layer, if any.
    pub parent: Option<usize>,

    /// Tileset index, present on tilemap layers only.
    pub tileset: Option<u32>,
}

impl Layer {
    /// True if the layer's own visible flag is set.
    ///
    /// Group visibility gates children; compositing also checks every
    /// enclosing group's flag.
    pub fn is_visible(&self) -> bool {
        self.flags & LAYER_VISIBLE != 0
    }

    /// True if the layer is the background layer.
    pub fn is_background(&self) -> bool {
        self.flags & LAYER_BACKGROUND != 0
    }

    /// True if the layer is a group layer.
    pub fn is_group(&self) -> bool {
        self.layer_type == LayerType::Group
    }
}

/// Resolve parent back-references over a flat, depth-annotated layer
/// list.
///
/// Maintains a stack of open group layers and a current-group cursor.
/// A layer whose child level is less than or equal to the current
/// group's closes that group's scope; a layer exactly one level
/// deeper is its child; a group layer opens a new scope.  One linear
/// pass over the list.
pub(crate) fn build_hierarchy(layers: &mut [Layer]) {
    let mut stack: Vec<Option<usize>> = Vec::new();
    let mut curgroup: Option<usize> = None;

    for i in 0..layers.len() {
        while let Some(g) = curgroup {
            if layers[i].child_level > layers[g].child_level {
                break;
            }
            curgroup = stack.pop().unwrap_or(None);
        }

        if let Some(g) = curgroup {
            if layers[i].child_level == layers[g].child_level + 1 {
                layers[i].parent = Some(g);
            }
        }

        if layers[i].layer_type == LayerType::Group {
            stack.push(curgroup);
            curgroup = Some(i);
        }
    }
}

/// True if the layer and every enclosing group are visible.
///
/// Parent indices always point at earlier list entries, so the walk
/// terminates.
pub(crate) fn effectively_visible(layers: &[Layer], idx: usize) -> bool {
    let mut cur = Some(idx);
    while let Some(i) = cur {
        if !layers[i].is_visible() {
            return false;
        }
        cur = layers[i].parent;
    }
    true
}
