//! Shared editor state read and written by every tool

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilecraft_core::{LayerId, TileRef};

/// Available editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorTool {
    #[default]
    Select,
    Paint,
    Erase,
}

/// Mutable editor session state: the active tool, layer, palette
/// selection, and per-layer lock flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorState {
    pub current_tool: EditorTool,
    pub active_layer: LayerId,
    /// Palette selection for content layers; `None` means nothing to paint.
    pub selected_tile: Option<TileRef>,
    /// Layers whose grids must not be mutated.
    pub layer_locks: HashMap<LayerId, bool>,
    /// Snap entity drags to the half-tile grid.
    pub entity_snap_to_grid: bool,
    /// Entity type placed by external palette UI; carried here so the
    /// whole palette state lives in one place.
    pub selected_entity_type: Option<String>,
    /// Erase brush size, 1..=3.
    pub brush_size: u32,
    /// Vertical finger offset in screen pixels so touch input is not
    /// occluded by the touching digit.
    pub touch_offset_y: f32,
    /// Upper bound on cells written by one flood fill.
    pub max_fill_tiles: usize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            current_tool: EditorTool::default(),
            active_layer: LayerId::Ground,
            selected_tile: None,
            layer_locks: HashMap::new(),
            entity_snap_to_grid: false,
            selected_entity_type: None,
            brush_size: 1,
            touch_offset_y: 0.0,
            max_fill_tiles: 4096,
        }
    }
}

impl EditorState {
    pub fn is_layer_locked(&self, layer: LayerId) -> bool {
        self.layer_locks.get(&layer).copied().unwrap_or(false)
    }

    pub fn set_layer_locked(&mut self, layer: LayerId, locked: bool) {
        self.layer_locks.insert(layer, locked);
    }
}

/// Records that the scene changed so an external renderer can redraw.
///
/// Stands in for a scene-changed callback: tools bump the revision after
/// every successful mutation and the embedding driver polls `take_dirty`
/// (or diffs `revision`) once a gesture call returns.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    dirty: bool,
    revision: u64,
}

impl ChangeTracker {
    pub fn mark(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Clears and returns the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
