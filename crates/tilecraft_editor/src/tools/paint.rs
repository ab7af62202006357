//! Paint tool: drag-paints the resolved tile value onto the active layer

use std::collections::HashMap;

use tilecraft_core::{LayerId, Scene};

use crate::commands::{History, Operation};
use crate::geometry::interpolate_line;
use crate::state::{ChangeTracker, EditorState};
use crate::tools::{drain_changes, record_change, resolve_paint_value};

/// Transient state of one paint gesture. Tracks the value being painted
/// and every cell changed so the whole drag commits as one undo step.
#[derive(Debug, Default)]
pub struct PaintGesture {
    painting: bool,
    layer: Option<LayerId>,
    value: u32,
    last_tile: Option<(i32, i32)>,
    changes: HashMap<(u32, u32), (u32, u32)>,
}

impl PaintGesture {
    pub fn is_painting(&self) -> bool {
        self.painting
    }

    fn reset(&mut self) {
        self.painting = false;
        self.layer = None;
        self.value = 0;
        self.last_tile = None;
        self.changes.clear();
    }
}

pub fn pointer_down(
    scene: &mut Scene,
    state: &EditorState,
    gesture: &mut PaintGesture,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    gesture.reset();

    let layer = state.active_layer;
    if state.is_layer_locked(layer) {
        return;
    }
    let Some(value) = resolve_paint_value(scene, state) else {
        return;
    };

    gesture.painting = true;
    gesture.layer = Some(layer);
    gesture.value = value;
    paint_cell(scene, gesture, tracker, layer, tile, value);
    gesture.last_tile = Some(tile);
}

pub fn pointer_move(
    scene: &mut Scene,
    gesture: &mut PaintGesture,
    tracker: &mut ChangeTracker,
    tile: (i32, i32),
) {
    if !gesture.painting {
        return;
    }
    let Some(layer) = gesture.layer else {
        return;
    };
    if gesture.last_tile == Some(tile) {
        return;
    }

    let value = gesture.value;
    match gesture.last_tile {
        Some((lx, ly)) => {
            for point in interpolate_line(lx, ly, tile.0, tile.1) {
                paint_cell(scene, gesture, tracker, layer, point, value);
            }
        }
        None => paint_cell(scene, gesture, tracker, layer, tile, value),
    }
    gesture.last_tile = Some(tile);
}

/// Finalize the gesture: one `TileEdit` per drag when anything changed.
pub fn pointer_up(gesture: &mut PaintGesture, history: &mut History) {
    if gesture.painting {
        if let Some(layer) = gesture.layer {
            let changes = drain_changes(&mut gesture.changes, layer);
            history.push(Operation::TileEdit {
                description: "Paint Tiles".to_string(),
                changes,
                selection: None,
            });
        }
    }
    gesture.reset();
}

/// Abort the gesture, reverting any cells it already painted.
pub fn cancel(scene: &mut Scene, gesture: &mut PaintGesture, tracker: &mut ChangeTracker) {
    if let Some(layer) = gesture.layer {
        if !gesture.changes.is_empty() {
            for (&(x, y), &(old, _)) in &gesture.changes {
                scene.set_tile(layer, x, y, old);
            }
            tracker.mark();
        }
    }
    gesture.reset();
}

/// Write one cell, skipping out-of-bounds coordinates and cells whose
/// value is already the paint value (revisits are idempotent no-ops).
fn paint_cell(
    scene: &mut Scene,
    gesture: &mut PaintGesture,
    tracker: &mut ChangeTracker,
    layer: LayerId,
    tile: (i32, i32),
    value: u32,
) {
    if !scene.in_bounds(tile.0, tile.1) {
        return;
    }
    let (x, y) = (tile.0 as u32, tile.1 as u32);
    let old = scene.tile(layer, x, y);
    if old == value {
        return;
    }
    scene.set_tile(layer, x, y, value);
    record_change(&mut gesture.changes, x, y, old, value);
    tracker.mark();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::select::SelectionState;
    use tilecraft_core::{TileCategory, TileRef};

    fn fixture() -> (Scene, EditorState, PaintGesture, History, ChangeTracker) {
        let mut scene = Scene::new("paint".to_string(), 10, 10, 32);
        scene.tilesets.add_category(TileCategory::new("terrain", 1, 64));
        let mut state = EditorState::default();
        state.selected_tile = Some(TileRef::new("terrain", 6));
        (
            scene,
            state,
            PaintGesture::default(),
            History::new(),
            ChangeTracker::default(),
        )
    }

    #[test]
    fn test_single_tap_paints_one_cell() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (3, 3));
        pointer_up(&mut gesture, &mut history);

        assert_eq!(scene.tile(LayerId::Ground, 3, 3), 7);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_drag_interpolates_a_line() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (0, 0));
        // Jumpy pointer: skips intermediate cells, the line fills them in.
        pointer_move(&mut scene, &mut gesture, &mut tracker, (4, 0));
        pointer_up(&mut gesture, &mut history);

        for x in 0..=4 {
            assert_eq!(scene.tile(LayerId::Ground, x, 0), 7);
        }
        // One undo step for the whole drag.
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_paint_is_idempotent() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (3, 3));
        pointer_up(&mut gesture, &mut history);
        let revision = tracker.revision();

        // Repainting the same value is a recorded no-op: grid and undo
        // stack stay unchanged.
        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (3, 3));
        pointer_up(&mut gesture, &mut history);

        assert_eq!(scene.tile(LayerId::Ground, 3, 3), 7);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(tracker.revision(), revision);
    }

    #[test]
    fn test_binary_layer_paints_one() {
        let (mut scene, mut state, mut gesture, mut history, mut tracker) = fixture();
        state.active_layer = LayerId::Collision;
        state.selected_tile = None;

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (2, 2));
        pointer_up(&mut gesture, &mut history);

        assert_eq!(scene.tile(LayerId::Collision, 2, 2), 1);
    }

    #[test]
    fn test_no_selected_tile_is_inert() {
        let (mut scene, mut state, mut gesture, mut history, mut tracker) = fixture();
        state.selected_tile = None;

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (2, 2));
        pointer_move(&mut scene, &mut gesture, &mut tracker, (4, 2));
        pointer_up(&mut gesture, &mut history);

        assert_eq!(scene.tile(LayerId::Ground, 2, 2), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_locked_layer_is_inert() {
        // Painting a locked layer leaves the grid untouched and pushes
        // no operation.
        let (mut scene, mut state, mut gesture, mut history, mut tracker) = fixture();
        state.set_layer_locked(LayerId::Ground, true);

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (2, 2));
        pointer_move(&mut scene, &mut gesture, &mut tracker, (5, 2));
        pointer_up(&mut gesture, &mut history);

        assert!(!scene.layer_has_tiles(LayerId::Ground));
        assert!(!history.can_undo());
        assert_eq!(tracker.revision(), 0);
    }

    #[test]
    fn test_out_of_bounds_cells_are_clipped() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (8, 0));
        pointer_move(&mut scene, &mut gesture, &mut tracker, (12, 0));
        pointer_up(&mut gesture, &mut history);

        assert_eq!(scene.tile(LayerId::Ground, 8, 0), 7);
        assert_eq!(scene.tile(LayerId::Ground, 9, 0), 7);
        // The gesture survived the off-grid stretch.
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_cancel_reverts_applied_cells() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (0, 0));
        pointer_move(&mut scene, &mut gesture, &mut tracker, (3, 0));
        cancel(&mut scene, &mut gesture, &mut tracker);

        assert!(!scene.layer_has_tiles(LayerId::Ground));
        assert!(!history.can_undo());

        let mut selection = SelectionState::default();
        assert!(!history.undo(&mut scene, &mut selection, &mut tracker));
    }

    #[test]
    fn test_drag_undo_restores_all_cells() {
        let (mut scene, state, mut gesture, mut history, mut tracker) = fixture();

        pointer_down(&mut scene, &state, &mut gesture, &mut tracker, (0, 0));
        pointer_move(&mut scene, &mut gesture, &mut tracker, (3, 3));
        pointer_up(&mut gesture, &mut history);

        let mut selection = SelectionState::default();
        history.undo(&mut scene, &mut selection, &mut tracker);
        assert!(!scene.layer_has_tiles(LayerId::Ground));
    }
}
