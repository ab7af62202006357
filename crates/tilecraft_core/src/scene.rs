//! Scene: the editable aggregate of tile layers and entities

use crate::{EntityInstance, Layer, LayerId, TilesetTable, EMPTY_TILE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A complete editable scene: four tile grids, placed entities, and the
/// tileset table used to resolve palette selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    pub layers: Vec<Layer>,
    pub entities: Vec<EntityInstance>,
    #[serde(default)]
    pub tilesets: TilesetTable,
}

impl Scene {
    /// Create a new empty scene with the four standard layers.
    pub fn new(name: String, width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            name,
            width,
            height,
            tile_size,
            layers: LayerId::ALL
                .iter()
                .map(|&id| Layer::new(id, width, height))
                .collect(),
            entities: Vec::new(),
            tilesets: TilesetTable::new(),
        }
    }

    /// Whether a tile coordinate lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Scene width in pixels.
    pub fn pixel_width(&self) -> f32 {
        (self.width * self.tile_size) as f32
    }

    /// Scene height in pixels.
    pub fn pixel_height(&self) -> f32 {
        (self.height * self.tile_size) as f32
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Whether a layer holds any non-empty cells.
    pub fn layer_has_tiles(&self, id: LayerId) -> bool {
        self.layer(id).map(|l| l.has_tiles()).unwrap_or(false)
    }

    /// Get the tile value at a position. Out-of-bounds reads return
    /// `EMPTY_TILE`.
    pub fn tile(&self, layer: LayerId, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return EMPTY_TILE;
        }
        let index = (y * self.width + x) as usize;
        self.layer(layer)
            .and_then(|l| l.tiles.get(index))
            .copied()
            .unwrap_or(EMPTY_TILE)
    }

    /// Set the tile value at a position. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, layer: LayerId, x: u32, y: u32, value: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y * self.width + x) as usize;
        if let Some(layer) = self.layer_mut(layer) {
            if index < layer.tiles.len() {
                layer.tiles[index] = value;
            }
        }
    }

    /// Resolve a palette selection against this scene's tileset table.
    pub fn gid_for_tile(&self, category: &str, local_index: u32) -> Option<u32> {
        self.tilesets.gid_for(category, local_index)
    }

    /// Get all tiles in a rectangular region (for undo/redo snapshots).
    /// The region is clamped to the grid.
    pub fn tiles_in_region(
        &self,
        layer: LayerId,
        min_x: u32,
        max_x: u32,
        min_y: u32,
        max_y: u32,
    ) -> Vec<((u32, u32), u32)> {
        let mut tiles = Vec::new();
        let min_x = min_x.min(self.width.saturating_sub(1));
        let max_x = max_x.min(self.width.saturating_sub(1));
        let min_y = min_y.min(self.height.saturating_sub(1));
        let max_y = max_y.min(self.height.saturating_sub(1));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                tiles.push(((x, y), self.tile(layer, x, y)));
            }
        }
        tiles
    }

    /// Add an entity to the scene
    pub fn add_entity(&mut self, entity: EntityInstance) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID
    pub fn remove_entity(&mut self, id: Uuid) -> Option<EntityInstance> {
        self.entities
            .iter()
            .position(|e| e.id == id)
            .map(|pos| self.entities.remove(pos))
    }

    /// Get entity by ID
    pub fn get_entity(&self, id: Uuid) -> Option<&EntityInstance> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get mutable entity by ID
    pub fn get_entity_mut(&mut self, id: Uuid) -> Option<&mut EntityInstance> {
        self.entities.iter_mut().find(|e| e.id == id)
    }
}
