//! Screen-to-world-to-tile coordinate mapping
//!
//! Screen and world space are both y-down; the world origin is the
//! scene's top-left corner. The viewport is an opaque pan/zoom state the
//! embedding driver owns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the viewing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World position visible at the screen origin.
    pub offset: Vec2,
    /// Screen pixels per world pixel. Must be positive.
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: Vec2, zoom: f32) -> Self {
        Self { offset, zoom }
    }
}

/// Convert a screen position to world coordinates.
pub fn screen_to_world(viewport: &Viewport, screen: Vec2) -> Vec2 {
    viewport.offset + screen / viewport.zoom
}

/// Convert a world position to the tile coordinate containing it.
pub fn world_to_tile(world: Vec2, tile_size: u32) -> (i32, i32) {
    let size = tile_size.max(1) as f32;
    (
        (world.x / size).floor() as i32,
        (world.y / size).floor() as i32,
    )
}

/// Convert a screen position to a tile coordinate.
pub fn screen_to_tile(viewport: &Viewport, screen: Vec2, tile_size: u32) -> (i32, i32) {
    world_to_tile(screen_to_world(viewport, screen), tile_size)
}

/// `screen_to_world` with the vertical finger offset applied, so touch
/// editing lands above the contact point.
pub fn screen_to_world_with_offset(viewport: &Viewport, screen: Vec2, offset_y: f32) -> Vec2 {
    screen_to_world(viewport, Vec2::new(screen.x, screen.y - offset_y))
}

/// `screen_to_tile` with the vertical finger offset applied.
pub fn screen_to_tile_with_offset(
    viewport: &Viewport,
    screen: Vec2,
    tile_size: u32,
    offset_y: f32,
) -> (i32, i32) {
    world_to_tile(screen_to_world_with_offset(viewport, screen, offset_y), tile_size)
}
