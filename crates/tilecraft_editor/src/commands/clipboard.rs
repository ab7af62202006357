//! Selection rectangles, snapshots, and the tile clipboard

use serde::{Deserialize, Serialize};
use tilecraft_core::{LayerId, Scene};

/// A normalized, scene-clamped selection rectangle on one layer.
/// Width and height are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub layer: LayerId,
}

impl SelectionBounds {
    /// Build bounds from two drag corner tiles, normalizing the corner
    /// order and clamping the rectangle inside the scene. A zero-area
    /// drag yields a 1x1 rectangle at the tap point.
    pub fn from_drag(a: (i32, i32), b: (i32, i32), scene: &Scene, layer: LayerId) -> Self {
        let max_x = scene.width.saturating_sub(1) as i32;
        let max_y = scene.height.saturating_sub(1) as i32;
        let ax = a.0.clamp(0, max_x);
        let ay = a.1.clamp(0, max_y);
        let bx = b.0.clamp(0, max_x);
        let by = b.1.clamp(0, max_y);

        let min_x = ax.min(bx) as u32;
        let min_y = ay.min(by) as u32;
        let w = (ax.max(bx) as u32) - min_x + 1;
        let h = (ay.max(by) as u32) - min_y + 1;

        Self {
            x: min_x,
            y: min_y,
            width: w,
            height: h,
            layer,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x as i32
            && y >= self.y as i32
            && x < (self.x + self.width) as i32
            && y < (self.y + self.height) as i32
    }
}

/// A selection rectangle plus a deep copy of the tile values it covers.
/// This is the payload moved through the clipboard and used to restore a
/// moved selection's origin cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionData {
    pub bounds: SelectionBounds,
    /// Row-major, `bounds.width * bounds.height` values.
    pub tiles: Vec<u32>,
}

impl SelectionData {
    /// Snapshot the tile values currently under `bounds`.
    pub fn capture(scene: &Scene, bounds: SelectionBounds) -> Self {
        let mut tiles = Vec::with_capacity((bounds.width * bounds.height) as usize);
        for dy in 0..bounds.height {
            for dx in 0..bounds.width {
                tiles.push(scene.tile(bounds.layer, bounds.x + dx, bounds.y + dy));
            }
        }
        Self { bounds, tiles }
    }

    /// Value at an offset within the selection.
    pub fn value_at(&self, dx: u32, dy: u32) -> u32 {
        self.tiles
            .get((dy * self.bounds.width + dx) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// In-memory holder of one selection snapshot.
///
/// Content is deep-copied on the way in and out so repeated pastes are
/// independent and mutation-safe. Clipboard content is not undoable
/// state and has no history integration.
#[derive(Debug, Clone, Default)]
pub struct TileClipboard {
    content: Option<SelectionData>,
}

impl TileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, data: &SelectionData) {
        self.content = Some(data.clone());
    }

    pub fn paste(&self) -> Option<SelectionData> {
        self.content.clone()
    }

    pub fn has_data(&self) -> bool {
        self.content.is_some()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}
