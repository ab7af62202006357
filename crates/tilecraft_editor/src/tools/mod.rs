//! Editing tools: paint, erase, and the select tool's tile/entity halves
//!
//! Each tool is a set of gesture handlers over shared state; the
//! `Editor` session routes pointer callbacks to the active tool.

pub mod entity;
pub mod erase;
pub mod paint;
pub mod select;

use tilecraft_core::{LayerId, Scene};
use tracing::warn;

use crate::state::EditorState;

/// Resolve the tile value a paint-like action writes on the active layer.
///
/// Binary layers always write 1. Content layers need a palette
/// selection that resolves through the scene's tileset table; a missing
/// selection is a silent no-op and a missing mapping is logged as a
/// warning - the gesture continues with zero effect either way.
pub(crate) fn resolve_paint_value(scene: &Scene, state: &EditorState) -> Option<u32> {
    if state.active_layer.is_binary() {
        return Some(1);
    }
    let tile = state.selected_tile.as_ref()?;
    match scene.gid_for_tile(&tile.category, tile.index) {
        Some(gid) => Some(gid),
        None => {
            warn!(
                category = %tile.category,
                index = tile.index,
                "no tileset mapping for selected tile; nothing to paint"
            );
            None
        }
    }
}

/// Record one cell's change in a gesture-scoped change map, keeping the
/// first observed old value and the latest new value.
pub(crate) fn record_change(
    changes: &mut std::collections::HashMap<(u32, u32), (u32, u32)>,
    x: u32,
    y: u32,
    old: u32,
    new: u32,
) {
    if let Some(change) = changes.get_mut(&(x, y)) {
        change.1 = new;
    } else {
        changes.insert((x, y), (old, new));
    }
}

/// Drain a gesture change map into `TileChange` records for one layer.
pub(crate) fn drain_changes(
    changes: &mut std::collections::HashMap<(u32, u32), (u32, u32)>,
    layer: LayerId,
) -> Vec<crate::commands::TileChange> {
    changes
        .drain()
        .filter(|&(_, (old, new))| old != new)
        .map(|((x, y), (old, new))| crate::commands::TileChange { layer, x, y, old, new })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecraft_core::{TileCategory, TileRef};

    #[test]
    fn test_resolve_binary_layer_writes_one() {
        let scene = Scene::new("t".to_string(), 4, 4, 32);
        let mut state = EditorState::default();
        state.active_layer = LayerId::Collision;
        assert_eq!(resolve_paint_value(&scene, &state), Some(1));
    }

    #[test]
    fn test_resolve_content_layer_needs_selection_and_mapping() {
        let mut scene = Scene::new("t".to_string(), 4, 4, 32);
        scene.tilesets.add_category(TileCategory::new("terrain", 1, 8));
        let mut state = EditorState::default();
        state.active_layer = LayerId::Ground;

        // No palette selection.
        assert_eq!(resolve_paint_value(&scene, &state), None);

        state.selected_tile = Some(TileRef::new("terrain", 3));
        assert_eq!(resolve_paint_value(&scene, &state), Some(4));

        // Unknown category resolves to nothing.
        state.selected_tile = Some(TileRef::new("decor", 0));
        assert_eq!(resolve_paint_value(&scene, &state), None);
    }
}
