//! Tileset table mapping palette categories to global tile ids

use serde::{Deserialize, Serialize};

/// A palette selection: a category plus a local tile index within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRef {
    pub category: String,
    pub index: u32,
}

impl TileRef {
    pub fn new(category: impl Into<String>, index: u32) -> Self {
        Self {
            category: category.into(),
            index,
        }
    }
}

/// One contiguous run of global tile ids belonging to a named category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileCategory {
    pub name: String,
    /// Global id of the category's first tile. Must be >= 1; 0 is the
    /// empty-cell value.
    pub first_gid: u32,
    pub tile_count: u32,
}

impl TileCategory {
    pub fn new(name: impl Into<String>, first_gid: u32, tile_count: u32) -> Self {
        Self {
            name: name.into(),
            first_gid,
            tile_count,
        }
    }
}

/// Per-scene table resolving (category, local index) pairs to the global
/// tile ids stored in layer cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilesetTable {
    pub categories: Vec<TileCategory>,
}

impl TilesetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&mut self, category: TileCategory) {
        self.categories.push(category);
    }

    /// Resolve a palette selection to a global tile id.
    ///
    /// Returns `None` when the category is unknown or the local index is
    /// outside the category's range ("no mapping configured").
    pub fn gid_for(&self, category: &str, local_index: u32) -> Option<u32> {
        let cat = self.categories.iter().find(|c| c.name == category)?;
        if local_index >= cat.tile_count {
            return None;
        }
        Some(cat.first_gid + local_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gid_resolution() {
        let mut table = TilesetTable::new();
        table.add_category(TileCategory::new("terrain", 1, 64));
        table.add_category(TileCategory::new("decor", 65, 16));

        assert_eq!(table.gid_for("terrain", 0), Some(1));
        assert_eq!(table.gid_for("terrain", 6), Some(7));
        assert_eq!(table.gid_for("decor", 0), Some(65));
        assert_eq!(table.gid_for("decor", 15), Some(80));
    }

    #[test]
    fn test_missing_mapping() {
        let mut table = TilesetTable::new();
        table.add_category(TileCategory::new("terrain", 1, 64));

        assert_eq!(table.gid_for("unknown", 0), None);
        assert_eq!(table.gid_for("terrain", 64), None);
    }
}
