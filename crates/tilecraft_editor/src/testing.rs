//! Test helpers for the editing engine.
//!
//! Factory functions for scenes and editor sessions, plus small gesture
//! conveniences, for use in `#[cfg(test)]` modules within this crate.
//! Import the whole module via glob:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use crate::testing::*;
//!     // ...
//! }
//! ```
#![allow(dead_code)]

use glam::Vec2;
use tilecraft_core::{LayerId, Scene, TileCategory};

use crate::session::Editor;

/// Standard test scene: the given tile grid, 32px tiles, and a single
/// "terrain" category mapping local index `i` to gid `i + 1`.
pub fn test_scene(width: u32, height: u32) -> Scene {
    let mut scene = Scene::new("test".to_string(), width, height, 32);
    scene.tilesets.add_category(TileCategory::new("terrain", 1, 64));
    scene
}

/// An editor over a 10x10 `test_scene` with default state
/// (`current_tool = Select`, `active_layer = Ground`).
pub fn editor_10x10() -> Editor {
    Editor::new(test_scene(10, 10))
}

/// Screen position of a tile's center under an identity viewport with
/// no touch offset.
pub fn tile_center(x: u32, y: u32) -> Vec2 {
    Vec2::new((x as f32 + 0.5) * 32.0, (y as f32 + 0.5) * 32.0)
}

/// Fill one whole layer with a value.
pub fn fill_layer(scene: &mut Scene, layer: LayerId, value: u32) {
    for y in 0..scene.height {
        for x in 0..scene.width {
            scene.set_tile(layer, x, y, value);
        }
    }
}
