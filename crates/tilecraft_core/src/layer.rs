//! The four named tile grids of a scene

use serde::{Deserialize, Serialize};

/// The value stored in an empty cell.
pub const EMPTY_TILE: u32 = 0;

/// Identifies one of the four layers every scene carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerId {
    Ground,
    Props,
    Collision,
    Triggers,
}

impl LayerId {
    /// All layers in draw order.
    pub const ALL: [LayerId; 4] = [
        LayerId::Ground,
        LayerId::Props,
        LayerId::Collision,
        LayerId::Triggers,
    ];

    /// Binary layers only store 0/1; content layers store global tile ids.
    pub fn is_binary(&self) -> bool {
        matches!(self, LayerId::Collision | LayerId::Triggers)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerId::Ground => "ground",
            LayerId::Props => "props",
            LayerId::Collision => "collision",
            LayerId::Triggers => "triggers",
        }
    }
}

/// A single tile grid within a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub visible: bool,
    /// Row-major tile values; `EMPTY_TILE` means empty.
    pub tiles: Vec<u32>,
}

impl Layer {
    /// Create a new empty layer of the given dimensions.
    pub fn new(id: LayerId, width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            id,
            visible: true,
            tiles: vec![EMPTY_TILE; size],
        }
    }

    /// Whether any cell holds a non-empty value.
    pub fn has_tiles(&self) -> bool {
        self.tiles.iter().any(|&t| t != EMPTY_TILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_empty() {
        let layer = Layer::new(LayerId::Ground, 10, 10);
        assert_eq!(layer.id, LayerId::Ground);
        assert!(layer.visible);
        assert_eq!(layer.tiles.len(), 100);
        assert!(!layer.has_tiles());
    }

    #[test]
    fn test_binary_layers() {
        assert!(!LayerId::Ground.is_binary());
        assert!(!LayerId::Props.is_binary());
        assert!(LayerId::Collision.is_binary());
        assert!(LayerId::Triggers.is_binary());
    }
}
